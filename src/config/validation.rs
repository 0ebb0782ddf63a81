use crate::config::types::{
    AnalysisConfig, Config, DiscoveryConfig, ExtractionConfig, FetcherConfig, InputConfig,
    OutputConfig,
};
use crate::model::Tone;
use crate::ConfigError;
use scraper::Selector;

/// User-agent fragments that identify automated clients
const BOT_MARKERS: &[&str] = &["bot", "crawler", "spider", "scraper", "curl/", "wget/"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_discovery_config(&config.discovery)?;
    validate_extraction_config(&config.extraction)?;
    validate_analysis_config(&config.analysis)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if !(10..=15).contains(&config.timeout_secs) {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 10 and 15, got {}",
            config.timeout_secs
        )));
    }

    if config.min_delay_ms > config.max_delay_ms {
        return Err(ConfigError::Validation(format!(
            "min_delay_ms ({}) must not exceed max_delay_ms ({})",
            config.min_delay_ms, config.max_delay_ms
        )));
    }

    validate_user_agent(&config.user_agent)
}

/// The user agent must be a browser identity, never blank or bot-like
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    let lowered = user_agent.to_lowercase();
    if let Some(marker) = BOT_MARKERS.iter().find(|m| lowered.contains(*m)) {
        return Err(ConfigError::Validation(format!(
            "user_agent must identify a standard browser, found '{}' in '{}'",
            marker, user_agent
        )));
    }

    if !user_agent.starts_with("Mozilla/") {
        return Err(ConfigError::Validation(format!(
            "user_agent must be a browser identity starting with 'Mozilla/', got '{}'",
            user_agent
        )));
    }

    Ok(())
}

/// Validates link discovery configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> Result<(), ConfigError> {
    if config.max_links < 1 {
        return Err(ConfigError::Validation(format!(
            "max_links must be >= 1, got {}",
            config.max_links
        )));
    }

    if config.min_path_segments < 1 {
        return Err(ConfigError::Validation(format!(
            "min_path_segments must be >= 1, got {}",
            config.min_path_segments
        )));
    }

    if let Some(indicators) = &config.post_indicators {
        validate_segment_list("post_indicators", indicators, false)?;
    }

    if let Some(excluded) = &config.excluded_segments {
        validate_segment_list("excluded_segments", excluded, true)?;
    }

    Ok(())
}

/// Validates a list of path segment names
fn validate_segment_list(
    field: &str,
    segments: &[String],
    allow_empty_list: bool,
) -> Result<(), ConfigError> {
    if segments.is_empty() && !allow_empty_list {
        return Err(ConfigError::Validation(format!(
            "{} cannot be an empty list",
            field
        )));
    }

    for segment in segments {
        if segment.trim().is_empty() || segment.contains('/') {
            return Err(ConfigError::Validation(format!(
                "{} entries must be single non-empty path segments, got '{}'",
                field, segment
            )));
        }
    }

    Ok(())
}

/// Validates extraction configuration
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if let Some(selectors) = &config.content_selectors {
        if selectors.is_empty() {
            return Err(ConfigError::Validation(
                "content_selectors cannot be an empty list".to_string(),
            ));
        }

        for selector in selectors {
            Selector::parse(selector).map_err(|e| {
                ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e))
            })?;
        }
    }

    Ok(())
}

/// Validates analysis configuration
fn validate_analysis_config(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if config.words_per_minute < 1 {
        return Err(ConfigError::Validation(
            "words_per_minute must be >= 1".to_string(),
        ));
    }

    if !config.too_basic_at.is_finite() || !config.optimal_at.is_finite() {
        return Err(ConfigError::Validation(
            "complexity thresholds must be finite numbers".to_string(),
        ));
    }

    if config.optimal_at >= config.too_basic_at {
        return Err(ConfigError::Validation(format!(
            "optimal_at ({}) must be below too_basic_at ({})",
            config.optimal_at, config.too_basic_at
        )));
    }

    for (key, cues) in &config.tone_cues {
        if Tone::from_key(key).is_none() {
            return Err(ConfigError::Validation(format!(
                "Unknown tone '{}' in tone_cues",
                key
            )));
        }

        if cues.iter().any(|cue| cue.trim_end_matches('*').trim().is_empty()) {
            return Err(ConfigError::InvalidPattern(format!(
                "Tone '{}' has an empty cue",
                key
            )));
        }
    }

    Ok(())
}

/// Validates input configuration
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.companies_csv.is_empty() {
        return Err(ConfigError::Validation(
            "companies_csv cannot be empty".to_string(),
        ));
    }

    if matches!(&config.performance_csv, Some(path) if path.is_empty()) {
        return Err(ConfigError::Validation(
            "performance_csv cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
