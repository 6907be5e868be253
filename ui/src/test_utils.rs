//! Shared fixtures for widget tests.

#![cfg(test)]

use rolodex_business::{UserId, UserRecord, UserStatus, UsersCompute};

use crate::state::State;

pub fn user(id: u64) -> UserRecord {
    UserRecord {
        id: UserId::Number(id),
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        phone: format!("555-01{id:02}"),
        address: format!("{id} Main St"),
        status: if id % 2 == 1 {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        },
    }
}

/// A state whose result set already holds users `1..=count`.
pub fn state_with_users(count: u64) -> State {
    let mut state = State::test("http://api.test".to_owned());
    state
        .ctx
        .updater()
        .set(UsersCompute::loaded((1..=count).map(user).collect()));
    state.ctx.sync_computes();
    state
}
