pub mod conclusion_editor;
pub mod introduction_editor;
pub mod report_body_editor;

pub use conclusion_editor::ConclusionEditor;
pub use introduction_editor::IntroductionEditor;
pub use report_body_editor::ReportBodyEditor;
