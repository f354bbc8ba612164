// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Time-parameterised motion used while a snap animates.

#[doc = "Start/target poses of a snap and per-step sampling."]
pub mod snap_span;
