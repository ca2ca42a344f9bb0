pub mod binomial;

pub use binomial::{binomial_cdf, binomial_coefficient, binomial_probability, binomial_tail};
