pub mod lesson_detail;
pub mod lesson_form;
pub mod lesson_list;
pub mod login;

pub use lesson_detail::LessonDetail;
pub use lesson_form::LessonForm;
pub use lesson_list::LessonList;
pub use login::Login;
