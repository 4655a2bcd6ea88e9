use webstat_engine::FetchSettings;

use crate::chart::ChartSettings;

/// Everything the binary needs to run; built from defaults only.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub fetch: FetchSettings,
    pub chart: ChartSettings,
}
