//! Domain entities - the client's view of the business objects.

mod forms;
mod session;
mod task;

pub use forms::{LoginForm, RegisterForm};
pub use session::{Credential, Session, User};
pub use task::{Task, TaskDraft, TaskFilter, TaskId, TaskStatus};
