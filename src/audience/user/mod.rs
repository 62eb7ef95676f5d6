// SPDX-License-Identifier: MIT

//! User records and the sample roster

mod record;
mod samples;

pub use record::{AttributeSection, UserRecord};
pub use samples::{
    sample_user, sample_users, users_with_targeted_leads, users_without_targeted_leads,
};
