pub mod caption;
pub mod config;
pub mod history;
pub mod publisher;
pub mod relay;
pub mod scheduler;
pub mod searcher;
pub mod selector;
pub mod testing;

pub use caption::{format_caption, CaptionConfig};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, FieldMapping,
    Visibility,
};
pub use history::{append_and_trim, HistoryError, HistoryStore, JsonHistoryStore};
pub use publisher::{
    MastodonPublisher, PublishError, PublishedStatus, Publisher, PublisherConfig,
};
pub use relay::{CycleOutcome, CycleStage, RelayConfig, RelayCycle};
pub use scheduler::{Cycle, Scheduler, SchedulerConfig};
pub use searcher::{ApiSearcher, SearchEntry, SearchError, Searcher};
pub use selector::select_candidate;
