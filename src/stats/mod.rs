pub mod rank;
pub mod significance;

pub use rank::{kendall_tau, pearson, rankdata, spearman, CorrelationResult};
pub use significance::{
    dependent_corr, independent_corr, rho_rxy_rxz, rz_ci, DependentMethod, IndependentMethod,
    SignificanceError, SignificanceVerdict, TestOptions,
};
