use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::announcements::model::{
    Announcement, AnnouncementWithAuthor, CreateAnnouncementDto, UpdateAnnouncementDto,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    ForgotPasswordRequest, LoginData, LoginRequest, RegisterRequestDto, ResetPasswordRequest,
    User, UserRole,
};
use crate::modules::classes::model::{Class, ClassWithTeacher, CreateClassDto, UpdateClassDto};
use crate::modules::dashboard::model::{
    ClassDistribution, DashboardStats, EntityCounts, StatusCount,
};
use crate::modules::events::model::{CreateEventDto, Event, UpdateEventDto};
use crate::modules::grades::model::{
    CreateGradeDto, Grade, GradeWithSubjects, SubjectSummary, UpdateGradeDto,
};
use crate::modules::students::model::{
    CreateStudentDto, Student, StudentWithClass, UpdateStudentDto,
};
use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectDto};
use crate::modules::teachers::model::{CreateTeacherDto, Teacher, UpdateTeacherDto};
use crate::modules::timetable::model::{
    CreateTimetableEntryDto, TimetableEntry, TimetableEntryDetailed, UpdateTimetableEntryDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::forgot_password,
        crate::modules::auth::controller::reset_password,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::delete_teacher,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::grades::controller::get_grades,
        crate::modules::grades::controller::get_grade,
        crate::modules::grades::controller::create_grade,
        crate::modules::grades::controller::update_grade,
        crate::modules::grades::controller::delete_grade,
        crate::modules::timetable::controller::get_timetable,
        crate::modules::timetable::controller::get_timetable_entry,
        crate::modules::timetable::controller::create_timetable_entry,
        crate::modules::timetable::controller::update_timetable_entry,
        crate::modules::timetable::controller::delete_timetable_entry,
        crate::modules::events::controller::get_events,
        crate::modules::events::controller::get_event,
        crate::modules::events::controller::create_event,
        crate::modules::events::controller::update_event,
        crate::modules::events::controller::delete_event,
        crate::modules::announcements::controller::get_announcements,
        crate::modules::announcements::controller::get_announcement,
        crate::modules::announcements::controller::create_announcement,
        crate::modules::announcements::controller::update_announcement,
        crate::modules::announcements::controller::delete_announcement,
        crate::modules::dashboard::controller::get_dashboard,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRequestDto,
            LoginRequest,
            LoginData,
            ForgotPasswordRequest,
            ResetPasswordRequest,
            ErrorResponse,
            Teacher,
            CreateTeacherDto,
            UpdateTeacherDto,
            Student,
            StudentWithClass,
            CreateStudentDto,
            UpdateStudentDto,
            Class,
            ClassWithTeacher,
            CreateClassDto,
            UpdateClassDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            Grade,
            GradeWithSubjects,
            SubjectSummary,
            CreateGradeDto,
            UpdateGradeDto,
            TimetableEntry,
            TimetableEntryDetailed,
            CreateTimetableEntryDto,
            UpdateTimetableEntryDto,
            Event,
            CreateEventDto,
            UpdateEventDto,
            Announcement,
            AnnouncementWithAuthor,
            CreateAnnouncementDto,
            UpdateAnnouncementDto,
            DashboardStats,
            EntityCounts,
            ClassDistribution,
            StatusCount,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Authentication", description = "User authentication endpoints"),
        (name = "Teachers", description = "Teacher management endpoints"),
        (name = "Students", description = "Student management endpoints"),
        (name = "Classes", description = "Class management endpoints"),
        (name = "Subjects", description = "Subject management endpoints"),
        (name = "Grades", description = "Grade configuration endpoints"),
        (name = "Timetable", description = "Timetable scheduling endpoints"),
        (name = "Calendar", description = "School event calendar endpoints"),
        (name = "Announcements", description = "Announcement endpoints"),
        (name = "Dashboard", description = "Aggregated statistics")
    ),
    info(
        title = "Learnroot API",
        version = "0.1.0",
        description = "School administration REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
