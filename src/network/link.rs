// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::error::{InfoDynError, Result};
use crate::estimators::InformationEstimator;
use crate::state::primed;

/// The seven terms of the link decomposition that are tracked as an integrand and
/// differenced over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecompositionTerm {
    /// H(Y | X, X')
    Alpha3_1,
    /// H(X | Y, Y')
    Alpha3_2,
    /// H(X') - H(X)
    Alpha4_1,
    /// H(Y') - H(Y)
    Alpha4_2,
    /// I(Y'; X') - I(Y; X)
    Alpha5,
    /// H(Y' | X, X')
    Alpha6_1,
    /// H(X' | Y, Y')
    Alpha6_2,
}

impl DecompositionTerm {
    pub const ALL: [DecompositionTerm; 7] = [
        DecompositionTerm::Alpha3_1,
        DecompositionTerm::Alpha3_2,
        DecompositionTerm::Alpha4_1,
        DecompositionTerm::Alpha4_2,
        DecompositionTerm::Alpha5,
        DecompositionTerm::Alpha6_1,
        DecompositionTerm::Alpha6_2,
    ];

    fn index(&self) -> usize {
        match self {
            DecompositionTerm::Alpha3_1 => 0,
            DecompositionTerm::Alpha3_2 => 1,
            DecompositionTerm::Alpha4_1 => 2,
            DecompositionTerm::Alpha4_2 => 3,
            DecompositionTerm::Alpha5 => 4,
            DecompositionTerm::Alpha6_1 => 5,
            DecompositionTerm::Alpha6_2 => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DecompositionTerm::Alpha3_1 => "3_1",
            DecompositionTerm::Alpha3_2 => "3_2",
            DecompositionTerm::Alpha4_1 => "4_1",
            DecompositionTerm::Alpha4_2 => "4_2",
            DecompositionTerm::Alpha5 => "5",
            DecompositionTerm::Alpha6_1 => "6_1",
            DecompositionTerm::Alpha6_2 => "6_2",
        }
    }

    pub fn integrand_label(&self) -> &'static str {
        match self {
            DecompositionTerm::Alpha3_1 => "3_1_I",
            DecompositionTerm::Alpha3_2 => "3_2_I",
            DecompositionTerm::Alpha4_1 => "4_1_I",
            DecompositionTerm::Alpha4_2 => "4_2_I",
            DecompositionTerm::Alpha5 => "5_I",
            DecompositionTerm::Alpha6_1 => "6_1_I",
            DecompositionTerm::Alpha6_2 => "6_2_I",
        }
    }
}

/// Series recorded for every link, in persisted column order.
///
/// With X the first and Y the second endpoint, `TE1` is the transfer Y -> X and `TE2`
/// the transfer X -> Y; the `rTE` series are their time-reversed counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkQuantity {
    MutualInformation,
    Te1,
    ReverseTe1,
    Te2,
    ReverseTe2,
    /// I(X';Y' | X,Y) - I(X;Y | X',Y')
    Alpha2,
    Integrand(DecompositionTerm),
    /// `integrand(t + 1) - integrand(t)`
    Difference(DecompositionTerm),
}

impl LinkQuantity {
    /// Quantities that are estimated directly (everything but the differences).
    pub fn primary() -> Vec<LinkQuantity> {
        let mut all = vec![
            LinkQuantity::MutualInformation,
            LinkQuantity::Te1,
            LinkQuantity::ReverseTe1,
            LinkQuantity::Te2,
            LinkQuantity::ReverseTe2,
            LinkQuantity::Alpha2,
        ];
        all.extend(DecompositionTerm::ALL.map(LinkQuantity::Integrand));
        all
    }

    pub fn all() -> Vec<LinkQuantity> {
        let mut all = Self::primary();
        all.extend(DecompositionTerm::ALL.map(LinkQuantity::Difference));
        all
    }

    pub fn label(&self) -> &'static str {
        match self {
            LinkQuantity::MutualInformation => "MI",
            LinkQuantity::Te1 => "TE1",
            LinkQuantity::ReverseTe1 => "rTE1",
            LinkQuantity::Te2 => "TE2",
            LinkQuantity::ReverseTe2 => "rTE2",
            LinkQuantity::Alpha2 => "2",
            LinkQuantity::Integrand(term) => term.integrand_label(),
            LinkQuantity::Difference(term) => term.label(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkSeries {
    pub mi: Vec<f64>,
    pub te1: Vec<f64>,
    pub rte1: Vec<f64>,
    pub te2: Vec<f64>,
    pub rte2: Vec<f64>,
    pub alpha_2: Vec<f64>,
    pub integrands: [Vec<f64>; 7],
    pub differences: [Vec<f64>; 7],
}

/// An undirected coupling stored under the ordered pair `(first, second)`.
#[derive(Debug, Clone)]
pub struct Link {
    first: String,
    second: String,
    series: LinkSeries,
}

impl Link {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            series: LinkSeries::default(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }

    pub fn tracked_nodes(&self) -> Vec<String> {
        vec![self.first.clone(), self.second.clone()]
    }

    pub fn series(&self, quantity: LinkQuantity) -> &[f64] {
        match quantity {
            LinkQuantity::MutualInformation => &self.series.mi,
            LinkQuantity::Te1 => &self.series.te1,
            LinkQuantity::ReverseTe1 => &self.series.rte1,
            LinkQuantity::Te2 => &self.series.te2,
            LinkQuantity::ReverseTe2 => &self.series.rte2,
            LinkQuantity::Alpha2 => &self.series.alpha_2,
            LinkQuantity::Integrand(term) => &self.series.integrands[term.index()],
            LinkQuantity::Difference(term) => &self.series.differences[term.index()],
        }
    }

    pub fn value(&self, quantity: LinkQuantity, step: usize) -> Option<f64> {
        self.series(quantity).get(step).copied()
    }

    /// Number of computed steps.
    pub fn len(&self) -> usize {
        self.series.mi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.mi.is_empty()
    }

    /// All quantities at `step`, in [`LinkQuantity::all`] order.
    ///
    /// `None` until the differences at `step` are defined, i.e. one step after the
    /// primary quantities.
    pub fn record(&self, step: usize) -> Option<Vec<f64>> {
        LinkQuantity::all()
            .iter()
            .map(|&q| self.value(q, step))
            .collect()
    }

    /// Estimate every link quantity on the estimator's current ensemble and append it.
    pub fn calculate<E>(&mut self, estimator: &mut E) -> Result<()>
    where
        E: InformationEstimator + ?Sized,
    {
        let (x, y) = (self.first.as_str(), self.second.as_str());
        let (xp, yp) = (primed(x), primed(y));
        let (xp, yp) = (xp.as_str(), yp.as_str());

        let mut values = vec![
            estimator.mutual_information(&[x, y], &[])?,
            estimator.mutual_information(&[y, xp], &[x])?,
            estimator.mutual_information(&[yp, x], &[xp])?,
            estimator.mutual_information(&[x, yp], &[y])?,
            estimator.mutual_information(&[xp, y], &[yp])?,
            estimator.mutual_information(&[xp, yp], &[x, y])?
                - estimator.mutual_information(&[x, y], &[xp, yp])?,
        ];
        for term in DecompositionTerm::ALL {
            let integrand = match term {
                DecompositionTerm::Alpha3_1 => estimator.conditional_entropy(&[y], &[x, xp])?,
                DecompositionTerm::Alpha3_2 => estimator.conditional_entropy(&[x], &[y, yp])?,
                DecompositionTerm::Alpha4_1 => estimator.entropy(&[xp])? - estimator.entropy(&[x])?,
                DecompositionTerm::Alpha4_2 => estimator.entropy(&[yp])? - estimator.entropy(&[y])?,
                DecompositionTerm::Alpha5 => {
                    estimator.mutual_information(&[yp, xp], &[])?
                        - estimator.mutual_information(&[y, x], &[])?
                }
                DecompositionTerm::Alpha6_1 => estimator.conditional_entropy(&[yp], &[x, xp])?,
                DecompositionTerm::Alpha6_2 => estimator.conditional_entropy(&[xp], &[y, yp])?,
            };
            values.push(integrand);
        }
        self.append(&values);
        Ok(())
    }

    /// Append one step of primary values, in [`LinkQuantity::primary`] order.
    ///
    /// Differences are derived exactly as after [`Link::calculate`].
    pub fn set_from_values(&mut self, values: &[f64]) -> Result<()> {
        let expected = LinkQuantity::primary().len();
        if values.len() != expected {
            return Err(InfoDynError::Configuration(format!(
                "link {}~{}: expected {expected} values, got {}",
                self.first,
                self.second,
                values.len()
            )));
        }
        self.append(values);
        Ok(())
    }

    fn append(&mut self, values: &[f64]) {
        let s = &mut self.series;
        s.mi.push(values[0]);
        s.te1.push(values[1]);
        s.rte1.push(values[2]);
        s.te2.push(values[3]);
        s.rte2.push(values[4]);
        s.alpha_2.push(values[5]);
        for (i, &value) in values[6..].iter().enumerate() {
            let integrand = &mut s.integrands[i];
            if let Some(&previous) = integrand.last() {
                s.differences[i].push(value - previous);
            }
            integrand.push(value);
        }
    }
}
