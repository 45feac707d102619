//! Fitted ARMA model results.

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::spec::ArmaSpec;

/// A fitted ARMA(p,q) model produced by [`ArmaSpec::fit()`].
///
/// Contains estimated AR (`phi`) and MA (`theta`) coefficients,
/// innovation variance (`sigma2`), residuals, and log-likelihood.
/// Use accessors to inspect results or call [`ArmaFit::simulate()`]
/// to generate synthetic realisations.
///
/// # Typestate Workflow
///
/// ```mermaid
/// graph LR
///     B["ArmaFit"] --> C[".ar() — AR coefficients"]
///     B --> D[".ma() — MA coefficients"]
///     B --> E[".sigma2() — innovation variance"]
///     B --> F[".aic() — Akaike Information Criterion"]
///     B --> G[".simulate(n, n_sim, &mut rng)"]
/// ```
#[derive(Clone, Debug)]
pub struct ArmaFit {
    spec: ArmaSpec,
    ar: Vec<f64>,
    ma: Vec<f64>,
    sigma2: f64,
    residuals: Vec<f64>,
    log_likelihood: f64,
    mean: f64,
}

impl ArmaFit {
    /// Creates a new `ArmaFit` (crate-internal constructor).
    #[allow(dead_code)]
    pub(crate) fn new(
        spec: ArmaSpec,
        ar: Vec<f64>,
        ma: Vec<f64>,
        sigma2: f64,
        residuals: Vec<f64>,
        log_likelihood: f64,
        mean: f64,
    ) -> Self {
        Self {
            spec,
            ar,
            ma,
            sigma2,
            residuals,
            log_likelihood,
            mean,
        }
    }

    /// Returns the [`ArmaSpec`] that produced this fit.
    pub fn spec(&self) -> ArmaSpec {
        self.spec
    }

    /// Returns the `(p, q)` order of the fitted model.
    pub fn order(&self) -> (usize, usize) {
        (self.spec.p(), self.spec.q())
    }

    /// Returns the AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Returns the MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Returns the innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Returns the one-step-ahead prediction residuals.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Returns the maximised log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Returns the estimated mean of the data used to fit this model.
    ///
    /// The ARMA model is fitted to the centred data (observations minus mean).
    /// Simulated paths from [`ArmaFit::simulate()`] have this mean added back.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Computes the Akaike Information Criterion (AIC) for this fit.
    ///
    /// AIC = 2k - 2 * log_likelihood, where k = p + q + 1 (number of
    /// estimated parameters: AR coefficients + MA coefficients + variance).
    /// Lower AIC indicates a better trade-off between fit and complexity.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let fit = ArmaSpec::new(1, 0).fit(&data)?;
    /// println!("AIC = {}", fit.aic());
    /// ```
    pub fn aic(&self) -> f64 {
        let k = (self.spec.p() + self.spec.q() + 1) as f64;
        2.0 * k - 2.0 * self.log_likelihood
    }

    /// Generates synthetic realisations from this fitted ARMA model.
    ///
    /// Draws `n_sim` independent sample paths, each of length `n`,
    /// by driving the model with Gaussian white noise.
    ///
    /// Returns an [`Array2<f64>`] with shape `(n, n_sim)` — each column
    /// is one realisation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use rand::thread_rng;
    /// let paths = fit.simulate(365, 100, &mut thread_rng());
    /// assert_eq!(paths.shape(), &[365, 100]);
    /// ```
    pub fn simulate<R: Rng>(&self, n: usize, n_sim: usize, rng: &mut R) -> Array2<f64> {
        const BURN_IN: usize = 100;

        // Edge cases
        if n == 0 || n_sim == 0 {
            return Array2::zeros((n, n_sim));
        }

        // Guard sigma2
        if !self.sigma2.is_finite() || self.sigma2 <= 0.0 {
            return Array2::zeros((n, n_sim));
        }

        let p = self.ar.len();
        let q = self.ma.len();
        let n_tot = BURN_IN + n;

        let normal = Normal::new(0.0, self.sigma2.sqrt()).unwrap();
        let mut output = Array2::zeros((n, n_sim));

        for sim in 0..n_sim {
            // Draw all innovations for this realization
            let eps: Vec<f64> = (0..n_tot).map(|_| normal.sample(rng)).collect();
            let mut y = vec![0.0; n_tot];

            for t in 0..n_tot {
                let mut val = eps[t];
                // AR part
                for i in 0..p {
                    if t > i {
                        val += self.ar[i] * y[t - 1 - i];
                    }
                }
                // MA part
                for j in 0..q {
                    if t > j {
                        val += self.ma[j] * eps[t - 1 - j];
                    }
                }
                y[t] = val;
            }

            // Copy post-burn-in into output column, adding mean
            for (i, &val) in y[BURN_IN..].iter().enumerate() {
                output[[i, sim]] = val + self.mean;
            }
        }

        output
    }
}
