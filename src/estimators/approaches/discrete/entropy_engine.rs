// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity-based entropy decompositions over any [`PdfSource`].
//!
//! All quantities are in nats and reduce to plug-in Shannon entropies of marginal PDFs:
//!
//! - H(A|B) = H(A, B) - H(B)
//! - I(X;Y|Z) = H(X|Z) + H(Y|Z) - H(X, Y|Z)
//! - I(X1;...;Xn|Z) = I(X1;...;Xn-1|Z) - I(X1;...;Xn-1|Z, Xn)

use super::statistics::PdfSource;
use crate::error::{InfoDynError, Result};

/// H(For) = -sum p ln p over the marginal PDF of `for_vars`, with 0 ln 0 = 0.
pub fn entropy<S: PdfSource + ?Sized>(source: &S, for_vars: &[&str]) -> Result<f64> {
    let pdf = source.desired_pdf(for_vars)?;
    let mut h = 0.0_f64;
    for &p in pdf.values() {
        h -= if p > 0.0 { p * p.ln() } else { 0.0 };
    }
    Ok(h)
}

pub fn conditional_entropy<S: PdfSource + ?Sized>(
    source: &S,
    for_vars: &[&str],
    known: &[&str],
) -> Result<f64> {
    if known.is_empty() {
        return entropy(source, for_vars);
    }
    let joint: Vec<&str> = for_vars.iter().chain(known.iter()).copied().collect();
    let h_xy = entropy(source, &joint)?;
    let h_x = entropy(source, known)?;
    Ok(h_xy - h_x)
}

/// I(X;Y | Known) for `for_vars = [X, Y]`.
pub fn mutual_information<S: PdfSource + ?Sized>(
    source: &S,
    for_vars: &[&str],
    known: &[&str],
) -> Result<f64> {
    if for_vars.len() != 2 {
        return Err(InfoDynError::dimension("mutual information", 2, for_vars.len()));
    }
    let h_x = conditional_entropy(source, &for_vars[..1], known)?;
    let h_y = conditional_entropy(source, &for_vars[1..], known)?;
    let h_xy = conditional_entropy(source, for_vars, known)?;
    Ok(h_x + h_y - h_xy)
}

pub fn multiple_mutual_information<S: PdfSource + ?Sized>(
    source: &S,
    for_vars: &[&str],
    known: &[&str],
) -> Result<f64> {
    peel_interaction_information(for_vars, known, &mut |f, k| {
        mutual_information(source, f, k)
    })
}

/// Interaction information of order `for_vars.len() - 1` from a (conditional) MI primitive.
///
/// Order 2 is `MI(For[..-1] | Known) - MI(For[..-1] | Known + For[-1])`; higher orders apply
/// the same difference to two order-1-lower terms. Cost doubles per order.
pub fn peel_interaction_information(
    for_vars: &[&str],
    known: &[&str],
    mi: &mut dyn FnMut(&[&str], &[&str]) -> Result<f64>,
) -> Result<f64> {
    if for_vars.len() < 3 {
        return Err(InfoDynError::dimension(
            "multiple mutual information",
            3,
            for_vars.len(),
        ));
    }
    let order = for_vars.len() - 1;
    let head = &for_vars[..order];
    let last = for_vars[order];
    let mut extended: Vec<&str> = known.to_vec();
    extended.push(last);

    if order == 2 {
        Ok(mi(head, known)? - mi(head, &extended)?)
    } else {
        let unconditioned = peel_interaction_information(head, known, mi)?;
        let conditioned = peel_interaction_information(head, &extended, mi)?;
        Ok(unconditioned - conditioned)
    }
}
