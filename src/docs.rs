use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::access::UserRole;
use crate::domain::enrollment::{EnrollmentDecision, EnrollmentStatus};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest};
use crate::modules::course_modules::model::{
    CourseModule, CreateCourseModuleDto, UpdateCourseModuleDto,
};
use crate::modules::departments::model::{CreateDepartmentDto, Department, UpdateDepartmentDto};
use crate::modules::enrollments::model::{DecideEnrollmentDto, Enrollment, SubmitEnrollmentDto};
use crate::modules::grades::model::{
    BulkGradeFailure, BulkGradeItem, BulkRecordGradesDto, BulkRecordResult, Grade, RecordGradeDto,
};
use crate::modules::programs::model::{
    CreateProgramDto, Program, ProgramDetails, ProgramLevel, UpdateProgramDto,
};
use crate::modules::users::model::User;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::get_users,
        crate::modules::departments::controller::create_department,
        crate::modules::departments::controller::get_departments,
        crate::modules::departments::controller::get_department,
        crate::modules::departments::controller::update_department,
        crate::modules::departments::controller::delete_department,
        crate::modules::programs::controller::create_program,
        crate::modules::programs::controller::get_programs,
        crate::modules::programs::controller::get_program,
        crate::modules::programs::controller::update_program,
        crate::modules::programs::controller::delete_program,
        crate::modules::course_modules::controller::create_module,
        crate::modules::course_modules::controller::get_modules,
        crate::modules::course_modules::controller::get_module,
        crate::modules::course_modules::controller::update_module,
        crate::modules::course_modules::controller::delete_module,
        crate::modules::enrollments::controller::submit_enrollment,
        crate::modules::enrollments::controller::decide_enrollment,
        crate::modules::enrollments::controller::get_enrollments,
        crate::modules::enrollments::controller::my_enrollments,
        crate::modules::enrollments::controller::pending_enrollments,
        crate::modules::grades::controller::record_grade,
        crate::modules::grades::controller::bulk_record_grades,
        crate::modules::grades::controller::get_module_grades,
        crate::modules::grades::controller::my_grades,
    ),
    components(
        schemas(
            User,
            UserRole,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ErrorResponse,
            Department,
            CreateDepartmentDto,
            UpdateDepartmentDto,
            Program,
            ProgramDetails,
            ProgramLevel,
            CreateProgramDto,
            UpdateProgramDto,
            CourseModule,
            CreateCourseModuleDto,
            UpdateCourseModuleDto,
            Enrollment,
            EnrollmentStatus,
            EnrollmentDecision,
            SubmitEnrollmentDto,
            DecideEnrollmentDto,
            Grade,
            RecordGradeDto,
            BulkGradeItem,
            BulkRecordGradesDto,
            BulkGradeFailure,
            BulkRecordResult,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Users", description = "User profiles and listing"),
        (name = "Departments", description = "Department management"),
        (name = "Programs", description = "Study program management"),
        (name = "Modules", description = "Course module management"),
        (name = "Enrollments", description = "Enrollment request workflow"),
        (name = "Grades", description = "Grade entry and consultation")
    ),
    info(
        title = "Scolarité API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL for academic administration: programs, enrollments and grades.",
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
