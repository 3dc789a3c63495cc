//! Index-wise merge of two forecast models.

use mfw_forecast::forecast::Model;

/// An element taken from one of the two models.
#[derive(Debug, PartialEq)]
pub struct Sourced<'a, T> {
    pub model: Model,
    pub value: &'a T,
}

impl<T> Clone for Sourced<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Sourced<'_, T> {}

/// Merge two per-timestep model outputs.
///
/// The result has the length of the longer input. Each index holds the
/// secondary model's element when present, else the primary's, else `None`.
/// Mismatched lengths are expected and never an error.
pub fn merge_models<'a, T>(
    primary: &'a [Option<T>],
    secondary: &'a [Option<T>],
) -> Vec<Option<Sourced<'a, T>>> {
    let len = primary.len().max(secondary.len());
    (0..len)
        .map(|i| {
            let from_secondary = secondary.get(i).and_then(Option::as_ref).map(|value| Sourced {
                model: Model::Secondary,
                value,
            });
            from_secondary.or_else(|| {
                primary.get(i).and_then(Option::as_ref).map(|value| Sourced {
                    model: Model::Primary,
                    value,
                })
            })
        })
        .collect()
}
