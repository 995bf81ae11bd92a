pub mod expert;
pub mod question_generator;
pub mod section_writer;

pub use expert::ExpertResponder;
pub use question_generator::QuestionGenerator;
pub use section_writer::SectionWriter;
