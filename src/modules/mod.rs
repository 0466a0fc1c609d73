pub mod announcements;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod events;
pub mod grades;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod timetable;
