mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalysisSettings, LlmSettings, LoggingSettings, ServerSettings, Settings, UploadSettings,
};
