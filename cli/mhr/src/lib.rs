//! Command-line front end for maternal health risk screening.

pub mod config;
pub mod repl;
pub mod ui;

use mhr_core::{Feature, InputForm};

/// Fill `form` from command-line values given in form order. `None`
/// leaves a field as the form declares it.
pub fn fill_form(form: &mut InputForm, values: [Option<f64>; 6]) {
    for (feature, value) in Feature::ALL.into_iter().zip(values) {
        if let Some(v) = value {
            form.set(feature, v);
        }
    }
}
