use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub locale: LocaleSettings,
    pub company: CompanySettings,
    pub snapshot: SnapshotSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Formatting locale for monetary output.
///
/// Injected instead of hardcoded so the service is portable to other
/// locales; defaults match French conventions (`1 234,56 €`).
#[derive(Deserialize, Clone)]
pub struct LocaleSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
    #[serde(default = "default_grouping_separator")]
    pub grouping_separator: char,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

fn default_decimal_separator() -> char {
    ','
}

fn default_grouping_separator() -> char {
    ' '
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            decimal_separator: default_decimal_separator(),
            grouping_separator: default_grouping_separator(),
        }
    }
}

/// Company identity printed on generated invoice PDFs.
#[derive(Deserialize, Clone)]
pub struct CompanySettings {
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

#[derive(Deserialize, Clone)]
pub struct SnapshotSettings {
    /// Path of the JSON snapshot holding clients and invoices.
    pub path: String,
    /// Disable to keep all state purely in memory.
    #[serde(default = "default_snapshot_enabled")]
    pub enabled: bool,
}

fn default_snapshot_enabled() -> bool {
    true
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");

    // Works both from the workspace root and from within aici-service
    let configuration_directory = if base_path.ends_with("aici-service") {
        base_path.join("config")
    } else {
        base_path.join("aici-service").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
