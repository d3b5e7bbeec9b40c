
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use coursedesk::config::{API_URL_VAR, ClientConfig, ConfigError, SESSION_FILE_VAR};
use coursedesk::net::api::ApiClient;
use coursedesk::net::error::ApiError;
use coursedesk::net::types::{CourseId, LessonId, NewLesson, UserType};
use coursedesk::routes;
use coursedesk::session::FileSessionStore;
use coursedesk::state::dashboard::{
    COURSE_DATA_FAILED, COURSE_DETAILS_FAILED, DASHBOARD_FAILED, INSTRUCTOR_COURSE_FAILED, peak_enrollments, trend_points,
};
use coursedesk::state::lessons::{CREATE_LESSON_FAILED, LESSON_FAILED, LessonNav, check_lesson_access, next_lesson_order};
use coursedesk::store::Store;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `coursedesk login <username>` first")]
    NotSignedIn,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("client setup failed: {0}")]
    Client(#[from] ApiError),
    #[error("{0}")]
    Operation(String),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "coursedesk", about = "Course platform command-line client")]
struct Cli {
    #[arg(long, global = true, env = API_URL_VAR)]
    api_url: Option<String>,

    #[arg(long, global = true, env = SESSION_FILE_VAR)]
    session_file: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session token.
    Login {
        username: String,
        #[arg(long, env = "COURSEDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in.
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "COURSEDESK_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "student")]
        user_type: UserType,
    },
    /// Forget the persisted session token.
    Logout,
    /// Report whether a session token is present.
    Whoami,
    Courses(CoursesCommand),
    Lessons(LessonsCommand),
    Instructor(InstructorCommand),
    /// Show which route a path resolves to for the current session.
    Route { path: String },
}

#[derive(Args, Debug)]
struct CoursesCommand {
    #[command(subcommand)]
    command: CoursesSubcommand,
}

#[derive(Subcommand, Debug)]
enum CoursesSubcommand {
    List,
    Show { course_id: CourseId },
    Enroll { course_id: CourseId },
    Unenroll { course_id: CourseId },
}

#[derive(Args, Debug)]
struct LessonsCommand {
    #[command(subcommand)]
    command: LessonsSubcommand,
}

#[derive(Subcommand, Debug)]
enum LessonsSubcommand {
    List {
        course_id: CourseId,
        /// Use the instructor listing, which includes unpublished lessons.
        #[arg(long, default_value_t = false)]
        instructor: bool,
    },
    Show {
        course_id: CourseId,
        lesson_id: LessonId,
        /// Read as the course instructor instead of as an enrolled student.
        #[arg(long, default_value_t = false)]
        instructor: bool,
    },
    Create {
        course_id: CourseId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// Defaults to one past the highest existing order.
        #[arg(long)]
        order: Option<u32>,
    },
}

#[derive(Args, Debug)]
struct InstructorCommand {
    #[command(subcommand)]
    command: InstructorSubcommand,
}

#[derive(Subcommand, Debug)]
enum InstructorSubcommand {
    Dashboard,
    Course { course_id: CourseId },
    Enrollments { course_id: CourseId },
}

struct CliContext {
    api: Arc<ApiClient>,
    store: Store,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_parts(cli.api_url.as_deref(), cli.session_file.as_deref())?;
    let api = Arc::new(ApiClient::new(&config.api_url)?);
    tracing::debug!(api_url = api.base_url(), session_file = %config.session_file.display(), "configured");
    let session = Arc::new(FileSessionStore::new(config.session_file));
    let store = Store::new(api.clone(), session);
    let ctx = CliContext { api, store };

    match cli.command {
        Command::Login { username, password } => run_login(&ctx, &username, &password).await,
        Command::Register { username, email, password, user_type } => {
            run_register(&ctx, &username, &email, &password, user_type).await
        }
        Command::Logout => {
            ctx.store.logout().await;
            println!("signed out");
            Ok(())
        }
        Command::Whoami => run_whoami(&ctx).await,
        Command::Courses(courses) => run_courses(&ctx, courses).await,
        Command::Lessons(lessons) => run_lessons(&ctx, lessons).await,
        Command::Instructor(instructor) => run_instructor(&ctx, instructor).await,
        Command::Route { path } => {
            let auth = ctx.store.snapshot().await.auth;
            let route = routes::resolve(&path, &auth);
            println!("{}", route.path().unwrap_or_default());
            Ok(())
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

async fn run_login(ctx: &CliContext, username: &str, password: &str) -> Result<(), CliError> {
    ctx.store.login(username, password).await;
    report_sign_in(ctx).await
}

async fn run_register(
    ctx: &CliContext,
    username: &str,
    email: &str,
    password: &str,
    user_type: UserType,
) -> Result<(), CliError> {
    ctx.store.register(username, email, password, user_type).await;
    report_sign_in(ctx).await
}

async fn report_sign_in(ctx: &CliContext) -> Result<(), CliError> {
    let auth = ctx.store.snapshot().await.auth;
    if let Some(error) = auth.error {
        return Err(CliError::Operation(error));
    }
    let user_type = auth.user_type.map_or("unknown", UserType::as_str);
    println!("signed in as {} ({user_type})", auth.username.unwrap_or_default());
    Ok(())
}

async fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    let auth = ctx.store.snapshot().await.auth;
    match (auth.is_authenticated(), auth.username) {
        (true, Some(name)) => println!("signed in as {name}"),
        (true, None) => println!("signed in (restored session)"),
        (false, _) => println!("signed out"),
    }
    Ok(())
}

async fn require_token(ctx: &CliContext) -> Result<String, CliError> {
    ctx.store.token().await.ok_or(CliError::NotSignedIn)
}

fn failed(fallback: &'static str) -> impl FnOnce(ApiError) -> CliError {
    move |e| {
        tracing::warn!(error = %e, "request failed");
        CliError::Operation(e.display_message(fallback))
    }
}

// =============================================================================
// COURSES
// =============================================================================

async fn run_courses(ctx: &CliContext, courses: CoursesCommand) -> Result<(), CliError> {
    match courses.command {
        CoursesSubcommand::List => {
            require_token(ctx).await?;
            ctx.store.fetch_courses().await;
            let state = ctx.store.snapshot().await.courses;
            if let Some(error) = state.error {
                return Err(CliError::Operation(error));
            }
            if state.items.is_empty() {
                println!("no courses");
            }
            for course in &state.items {
                let marker = if course.is_enrolled { "*" } else { " " };
                let instructor = course.instructor.as_ref().map(|i| i.label()).unwrap_or_default();
                println!("{marker} {:>5}  {}  {instructor}", course.id, course.title);
            }
            Ok(())
        }
        CoursesSubcommand::Show { course_id } => {
            let token = require_token(ctx).await?;
            let detail = ctx
                .api
                .course_detail(&token, course_id)
                .await
                .map_err(failed(COURSE_DETAILS_FAILED))?;
            print_json(&detail)
        }
        CoursesSubcommand::Enroll { course_id } => {
            require_token(ctx).await?;
            ctx.store.enroll_course(course_id).await;
            report_enrollment(ctx, "Successfully enrolled in the course!").await
        }
        CoursesSubcommand::Unenroll { course_id } => {
            require_token(ctx).await?;
            ctx.store.unenroll_course(course_id).await;
            report_enrollment(ctx, "Successfully unenrolled from the course!").await
        }
    }
}

async fn report_enrollment(ctx: &CliContext, success: &str) -> Result<(), CliError> {
    match ctx.store.snapshot().await.courses.enrollment_error {
        Some(error) => Err(CliError::Operation(error)),
        None => {
            println!("{success}");
            Ok(())
        }
    }
}

// =============================================================================
// LESSONS
// =============================================================================

async fn run_lessons(ctx: &CliContext, lessons: LessonsCommand) -> Result<(), CliError> {
    let token = require_token(ctx).await?;
    match lessons.command {
        LessonsSubcommand::List { course_id, instructor } => {
            let lessons = if instructor {
                ctx.api.instructor_lessons(&token, course_id).await
            } else {
                ctx.api.course_lessons(&token, course_id).await
            }
            .map_err(failed(LESSON_FAILED))?;
            if lessons.is_empty() {
                println!("No lessons available yet.");
            }
            for (index, lesson) in lessons.iter().enumerate() {
                let duration = lesson.duration.map_or_else(|| "N/A".to_owned(), |d| d.to_string());
                let status = lesson.status.as_deref().unwrap_or("Available");
                println!("{}. {} ({duration} mins, {status}) [id {}]", index + 1, lesson.title, lesson.id);
            }
            Ok(())
        }
        LessonsSubcommand::Show { course_id, lesson_id, instructor } => {
            let status = ctx
                .api
                .enrollment_status(&token, course_id)
                .await
                .map_err(failed(LESSON_FAILED))?;
            let user_type = if instructor {
                Some(UserType::Instructor)
            } else {
                ctx.store.snapshot().await.auth.user_type
            };
            check_lesson_access(status.is_enrolled, user_type).map_err(|m| CliError::Operation(m.to_owned()))?;

            let lessons = ctx
                .api
                .course_lessons(&token, course_id)
                .await
                .map_err(failed(LESSON_FAILED))?;
            let lesson = ctx
                .api
                .lesson(&token, course_id, lesson_id)
                .await
                .map_err(failed(LESSON_FAILED))?;
            print_json(&lesson)?;

            let nav = LessonNav::locate(&lessons, lesson_id);
            if let Some(previous) = nav.previous {
                println!("previous: /courses/{course_id}/lessons/{previous}");
            }
            if let Some(next) = nav.next {
                println!("next: /courses/{course_id}/lessons/{next}");
            }
            Ok(())
        }
        LessonsSubcommand::Create { course_id, title, content, order } => {
            let order = match order {
                Some(order) => order,
                None => {
                    let existing = ctx
                        .api
                        .instructor_lessons(&token, course_id)
                        .await
                        .map_err(failed(CREATE_LESSON_FAILED))?;
                    next_lesson_order(&existing)
                }
            };
            let lesson = ctx
                .api
                .create_lesson(&token, course_id, &NewLesson { title: &title, content: &content, order })
                .await
                .map_err(failed(CREATE_LESSON_FAILED))?;
            tracing::info!(course_id, lesson_id = lesson.id, order, "lesson created");
            print_json(&lesson)
        }
    }
}

// =============================================================================
// INSTRUCTOR
// =============================================================================

async fn run_instructor(ctx: &CliContext, instructor: InstructorCommand) -> Result<(), CliError> {
    let token = require_token(ctx).await?;
    match instructor.command {
        InstructorSubcommand::Dashboard => {
            let dash = ctx
                .api
                .instructor_dashboard(&token)
                .await
                .map_err(failed(DASHBOARD_FAILED))?;
            let overview = dash.overview;
            println!(
                "courses: {}  students: {}  lessons: {}",
                overview.total_courses, overview.total_students, overview.total_lessons
            );
            let points = trend_points(&dash.enrollment_trends);
            let peak = peak_enrollments(&points);
            for point in &points {
                println!("{}  {:>4}  {}", point.date, point.enrollments, trend_bar(point.enrollments, peak));
            }
            for enrollment in &dash.recent_enrollments {
                println!(
                    "{}  {}  {}",
                    enrollment.student_name,
                    enrollment.course_title.as_deref().unwrap_or("-"),
                    enrollment.date.as_deref().unwrap_or("-")
                );
            }
            for course in &dash.courses {
                println!(
                    "[{}] {}  students: {}  lessons: {}",
                    course.id, course.title, course.total_students, course.total_lessons
                );
            }
            Ok(())
        }
        InstructorSubcommand::Course { course_id } => {
            let details = ctx
                .api
                .instructor_course_details(&token, course_id)
                .await
                .map_err(failed(INSTRUCTOR_COURSE_FAILED))?;
            print_json(&details)
        }
        InstructorSubcommand::Enrollments { course_id } => {
            let enrollments = ctx
                .api
                .instructor_enrollments(&token, course_id)
                .await
                .map_err(failed(COURSE_DATA_FAILED))?;
            for enrollment in &enrollments {
                println!(
                    "{}  {}",
                    enrollment.student.display_name(),
                    enrollment.enrollment_date.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
    }
}

const TREND_BAR_WIDTH: u64 = 40;

/// Bar scaled so the peak day spans the full width.
fn trend_bar(count: u64, peak: u64) -> String {
    if peak == 0 {
        return String::new();
    }
    let width = usize::try_from(count * TREND_BAR_WIDTH / peak).unwrap_or(0);
    "#".repeat(width)
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
