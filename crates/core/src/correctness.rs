// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Functions for condition and predicate checks similar to the *design by contract* philosophy.
//!
//! All functions return an `anyhow::Result<()>` so that failures can either be propagated or
//! turned into a panic at the call site with `.expect(FAILED)`.

use anyhow::{Result, bail};

/// Standard message prefix for condition check failures.
pub const FAILED: &str = "Condition failed:";

/// Validates the content of a string `s`.
///
/// # Errors
///
/// Returns an error if:
/// - `s` is an empty string.
/// - `s` consists solely of whitespace characters.
/// - `s` contains one or more non-ASCII characters.
pub fn check_valid_string(s: &str, desc: &str) -> Result<()> {
    if s.is_empty() {
        bail!("{FAILED} invalid string for {desc}, was empty")
    } else if s.chars().all(char::is_whitespace) {
        bail!("{FAILED} invalid string for {desc}, was all whitespace")
    } else if !s.is_ascii() {
        bail!("{FAILED} invalid string for {desc} contained a non-ASCII char, was '{s}'")
    } else {
        Ok(())
    }
}

/// Validates that the predicate is true.
///
/// # Errors
///
/// Returns an error if `predicate` is false.
pub fn check_predicate_true(predicate: bool, fail_msg: &str) -> Result<()> {
    if !predicate {
        bail!("{FAILED} {fail_msg}")
    }
    Ok(())
}

/// Validates that the predicate is false.
///
/// # Errors
///
/// Returns an error if `predicate` is true.
pub fn check_predicate_false(predicate: bool, fail_msg: &str) -> Result<()> {
    if predicate {
        bail!("{FAILED} {fail_msg}")
    }
    Ok(())
}

/// Validates that the `u64` value is positive (> 0).
///
/// # Errors
///
/// Returns an error if `value` is zero.
pub fn check_positive_u64(value: u64, desc: &str) -> Result<()> {
    if value == 0 {
        bail!("{FAILED} invalid u64 for {desc} not positive, was {value}")
    }
    Ok(())
}

/// Validates that the `f64` value is positive (> 0) and finite.
///
/// # Errors
///
/// Returns an error if `value` is NaN, infinite, or not positive.
pub fn check_positive_f64(value: f64, desc: &str) -> Result<()> {
    if value.is_nan() || value.is_infinite() {
        bail!("{FAILED} invalid f64 for {desc}, was {value}")
    }
    if value <= 0.0 {
        bail!("{FAILED} invalid f64 for {desc} not positive, was {value}")
    }
    Ok(())
}

/// Validates that the `f64` value is non-negative and finite.
///
/// # Errors
///
/// Returns an error if `value` is NaN, infinite, or negative.
pub fn check_non_negative_f64(value: f64, desc: &str) -> Result<()> {
    if value.is_nan() || value.is_infinite() {
        bail!("{FAILED} invalid f64 for {desc}, was {value}")
    }
    if value < 0.0 {
        bail!("{FAILED} invalid f64 for {desc} negative, was {value}")
    }
    Ok(())
}
