//! Test fixtures for integration tests
//!
//! Provides sample incident exports and helpers for building pipelines

use std::path::Path;

use trendline::config::{Config, OutputFormat, SeriesConfig};

/// Export with three parsable timestamps over two years and one bad row
pub const SAMPLE_INCIDENTS_CSV: &str = "\
ID,Incident_Num,Incident_Type,Occured_date_time,Precinct
1,2020-001,Level 1 - Use of Force,01/01/2020 01:00:00 AM,North
2,2020-002,Level 2 - Use of Force,06/01/2020 02:00:00 PM,East
3,2021-001,Level 1 - Use of Force,01/01/2021 03:00:00 AM,South
4,2021-002,Level 1 - Use of Force,,West
";

/// Export spanning four years with a rising count
pub const RISING_INCIDENTS_CSV: &str = "\
Occured_date_time,Precinct
03/14/2015 10:15:00 AM,North
07/02/2016 11:45:00 PM,North
08/19/2016 04:30:00 AM,East
01/05/2017 12:00:00 PM,West
02/11/2017 09:20:00 AM,West
12/31/2017 11:59:59 PM,South
04/04/2018 06:00:00 AM,East
05/05/2018 07:00:00 AM,East
06/06/2018 08:00:00 AM,North
07/07/2018 09:00:00 AM,South
";

/// Export where every incident falls in the same year
pub const SINGLE_YEAR_CSV: &str = "\
Occured_date_time
02/01/2019 01:00:00 AM
03/01/2019 01:00:00 AM
";

/// Export using semicolons and a different column name
pub const SEMICOLON_CSV: &str = "\
Reported;Beat
01/01/2010 01:00:00 AM;K1
01/01/2011 01:00:00 AM;K2
02/01/2011 01:00:00 AM;K3
";

/// Build a config reading `dataset` and writing into `out_dir`
pub fn config_for(dataset: &Path, out_dir: &Path, format: OutputFormat) -> Config {
    let mut config = Config::default();
    config.dataset.path = dataset.to_path_buf();
    config.output.format = format;
    config.output.path = out_dir.join(format!("chart.{}", format.extension()));
    config
}

/// A chart instance with the given id and trendline state
pub fn series_config(id: &str, show_trendline: bool) -> SeriesConfig {
    SeriesConfig {
        id: id.to_string(),
        show_trendline,
        ..Default::default()
    }
}
