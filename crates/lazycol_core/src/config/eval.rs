use std::collections::HashMap;
use std::sync::LazyLock;

use lazycol_error::{LcError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arrays::datatype::TimeUnit;
use crate::arrays::scalar::ScalarValue;

/// Configuration for evaluating expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub default_time_unit: TimeUnit,
    pub enable_parse_cache: bool,
    pub json_infer_schema_length: u64,
}

pub const DEFAULT_JSON_INFER_SCHEMA_LENGTH: u64 = 100;

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            default_time_unit: TimeUnit::Microseconds,
            enable_parse_cache: true,
            json_infer_schema_length: DEFAULT_JSON_INFER_SCHEMA_LENGTH,
        }
    }
}

impl EvalConfig {
    /// Load a config from a JSON object. Missing keys take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let conf: EvalConfig = serde_json::from_str(s).context("Failed to parse eval config")?;
        JsonInferSchemaLength::validate_value(conf.json_infer_schema_length)?;
        Ok(conf)
    }

    pub fn set_from_scalar(&mut self, name: &str, value: &ScalarValue) -> Result<()> {
        let func = GET_SET_FUNCTIONS.get(name).ok_or_else(|| missing_setting(name))?;
        (func.set)(value, self)?;
        debug!(setting = name, %value, "set eval setting");
        Ok(())
    }

    pub fn get_as_scalar(&self, name: &str) -> Result<ScalarValue> {
        let func = GET_SET_FUNCTIONS.get(name).ok_or_else(|| missing_setting(name))?;
        Ok((func.get)(self))
    }

    pub fn reset(&mut self, name: &str) -> Result<()> {
        let func = GET_SET_FUNCTIONS.get(name).ok_or_else(|| missing_setting(name))?;
        let scalar = (func.get)(&Self::default());
        (func.set)(&scalar, self)
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Names and descriptions of all settings, sorted by name.
    pub fn settings() -> Vec<(&'static str, &'static str)> {
        let mut settings: Vec<_> = GET_SET_FUNCTIONS
            .iter()
            .map(|(name, funcs)| (*name, funcs.description))
            .collect();
        settings.sort_unstable();
        settings
    }
}

fn missing_setting(name: &str) -> LcError {
    LcError::argument(format!("Missing setting for '{name}'")).with_field("setting", name)
}

struct SettingFunctions {
    description: &'static str,
    set: fn(scalar: &ScalarValue, conf: &mut EvalConfig) -> Result<()>,
    get: fn(conf: &EvalConfig) -> ScalarValue,
}

impl SettingFunctions {
    const fn new<S: EvalSetting>() -> Self {
        SettingFunctions {
            description: S::DESCRIPTION,
            set: S::set_from_scalar as _,
            get: S::get_as_scalar as _,
        }
    }
}

fn insert_setting<S: EvalSetting>(map: &mut HashMap<&'static str, SettingFunctions>) {
    if map.insert(S::NAME, SettingFunctions::new::<S>()).is_some() {
        panic!("Duplicate settings names: {}", S::NAME);
    }
}

static GET_SET_FUNCTIONS: LazyLock<HashMap<&'static str, SettingFunctions>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    insert_setting::<DefaultTimeUnit>(&mut map);
    insert_setting::<EnableParseCache>(&mut map);
    insert_setting::<JsonInferSchemaLength>(&mut map);

    map
});

pub trait EvalSetting: Sync + Send + 'static {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn set_from_scalar(scalar: &ScalarValue, conf: &mut EvalConfig) -> Result<()>;
    fn get_as_scalar(conf: &EvalConfig) -> ScalarValue;
}

pub struct DefaultTimeUnit;

impl EvalSetting for DefaultTimeUnit {
    const NAME: &'static str = "default_time_unit";
    const DESCRIPTION: &'static str =
        "Time unit for parsed datetimes when neither the call nor the format decides one";

    fn set_from_scalar(scalar: &ScalarValue, conf: &mut EvalConfig) -> Result<()> {
        let val = scalar.try_as_str()?.parse::<TimeUnit>()?;
        conf.default_time_unit = val;
        Ok(())
    }

    fn get_as_scalar(conf: &EvalConfig) -> ScalarValue {
        conf.default_time_unit.as_str().into()
    }
}

pub struct EnableParseCache;

impl EvalSetting for EnableParseCache {
    const NAME: &'static str = "enable_parse_cache";
    const DESCRIPTION: &'static str = "Allow temporal parsing to memoize repeated inputs";

    fn set_from_scalar(scalar: &ScalarValue, conf: &mut EvalConfig) -> Result<()> {
        let val = scalar.try_as_bool()?;
        conf.enable_parse_cache = val;
        Ok(())
    }

    fn get_as_scalar(conf: &EvalConfig) -> ScalarValue {
        conf.enable_parse_cache.into()
    }
}

const MIN_JSON_INFER_SCHEMA_LENGTH: u64 = 1;
const MAX_JSON_INFER_SCHEMA_LENGTH: u64 = 100_000;

pub struct JsonInferSchemaLength;

impl JsonInferSchemaLength {
    pub fn validate_value(val: u64) -> Result<()> {
        if val < MIN_JSON_INFER_SCHEMA_LENGTH {
            return Err(LcError::argument(format!(
                "JSON infer schema length cannot be less than {MIN_JSON_INFER_SCHEMA_LENGTH}"
            ))
            .with_field("value", val));
        }

        if val > MAX_JSON_INFER_SCHEMA_LENGTH {
            return Err(LcError::argument(format!(
                "JSON infer schema length cannot be greater than {MAX_JSON_INFER_SCHEMA_LENGTH}"
            ))
            .with_field("value", val));
        }

        Ok(())
    }
}

impl EvalSetting for JsonInferSchemaLength {
    const NAME: &'static str = "json_infer_schema_length";
    const DESCRIPTION: &'static str = "Number of non-null rows sampled when inferring a JSON type";

    fn set_from_scalar(scalar: &ScalarValue, conf: &mut EvalConfig) -> Result<()> {
        let val = scalar.try_as_i64()?;
        let val = u64::try_from(val).map_err(|_| {
            LcError::argument("JSON infer schema length cannot be negative").with_field("value", val)
        })?;
        Self::validate_value(val)?;

        conf.json_infer_schema_length = val;
        Ok(())
    }

    fn get_as_scalar(conf: &EvalConfig) -> ScalarValue {
        conf.json_infer_schema_length.into()
    }
}
