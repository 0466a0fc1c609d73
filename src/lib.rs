//! School administration backend: authentication, role-gated CRUD for
//! teachers, students, classes, subjects and grades, timetable scheduling
//! with slot conflict detection, an event calendar, announcements, and a
//! dashboard of aggregate statistics.

pub mod cli;
pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
