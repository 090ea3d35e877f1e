// Copyright (c) 2026 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! User Interface (UI) utilities.

mod select_candidate;
mod show_plan;
mod util;

pub use select_candidate::{select_candidate, CandidateSelection};
pub use show_plan::{confirm, show_release, show_rename_plan, show_unmatched};
