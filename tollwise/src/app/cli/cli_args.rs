use clap::Parser;
use tollwise_core::model::trip::Period;

#[derive(Parser, Debug)]
#[command(name = "tollwise", about = "congestion toll trip analysis pipeline")]
pub struct CliArgs {
    /// path to the pipeline TOML configuration
    #[arg(short, long)]
    pub config_file: String,

    /// restrict the run to these periods (default: both)
    #[arg(long, value_delimiter = ',')]
    pub periods: Option<Vec<Period>>,

    /// proceed when the precipitation series does not span the full
    /// analysis window, joining on the covered intersection
    #[arg(long, default_value_t = false)]
    pub allow_reduced_weather_window: bool,
}

impl CliArgs {
    /// periods to run, in fixed baseline-first order
    pub fn selected_periods(&self) -> Vec<Period> {
        match &self.periods {
            None => vec![Period::Baseline, Period::Treatment],
            Some(periods) => {
                let mut selected = Vec::with_capacity(2);
                for period in [Period::Baseline, Period::Treatment] {
                    if periods.contains(&period) {
                        selected.push(period);
                    }
                }
                selected
            }
        }
    }
}
