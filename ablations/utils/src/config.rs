//! 由环境变量驱动的实验配置.

use std::env;
use thiserror::Error;

/// 球半径列表 (mm), 逗号分隔, 例如 `2.5,5,10`.
pub const RADII_ENV: &str = "VOLUME8_RADII_MM";

/// 扫描几何列表, 逗号分隔的 `像素间距:层间距` (mm), 例如 `0.7:1.25,0.5:2.5`.
pub const SPACINGS_ENV: &str = "VOLUME8_SPACINGS_MM";

/// 未设置 `$VOLUME8_RADII_MM` 时使用的半径.
pub const DEFAULT_RADII_MM: [f64; 4] = [2.5, 5.0, 10.0, 15.0];

/// 未设置 `$VOLUME8_SPACINGS_MM` 时使用的扫描几何.
pub const DEFAULT_SPACINGS_MM: [(f64, f64); 3] = [(0.7, 1.25), (0.7, 2.5), (0.5, 1.0)];

/// 配置解析错误.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// 无法解析为浮点数.
    #[error("${key}: cannot parse {value:?} as a number")]
    Number {
        /// 环境变量名.
        key: &'static str,
        /// 出错的片段.
        value: String,
    },

    /// 几何项不是 `像素间距:层间距` 的形式.
    #[error("${key}: expected `pixel:slice`, found {value:?}")]
    Pair {
        /// 环境变量名.
        key: &'static str,
        /// 出错的片段.
        value: String,
    },

    /// 数值不是有限正数.
    #[error("${key}: {value} is not a positive finite number")]
    NonPositive {
        /// 环境变量名.
        key: &'static str,
        /// 出错的数值.
        value: f64,
    },

    /// 列表为空.
    #[error("${0} is empty")]
    Empty(&'static str),
}

/// 体积消融实验 (`volume8`) 的配置.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume8Config {
    /// 球半径 (mm).
    pub radii_mm: Vec<f64>,
    /// 扫描几何 `(像素间距, 层间距)` (mm).
    pub spacings_mm: Vec<(f64, f64)>,
}

impl Default for Volume8Config {
    fn default() -> Self {
        Self {
            radii_mm: DEFAULT_RADII_MM.to_vec(),
            spacings_mm: DEFAULT_SPACINGS_MM.to_vec(),
        }
    }
}

impl Volume8Config {
    /// 从 `$VOLUME8_RADII_MM` 与 `$VOLUME8_SPACINGS_MM` 读取配置. 未设置的项使用默认值.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var(RADII_ENV).ok(), env::var(SPACINGS_ENV).ok())
    }

    /// 由两个环境变量的原始值构造.
    pub fn from_vars(radii: Option<String>, spacings: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(s) = radii {
            config.radii_mm = split(RADII_ENV, &s)?
                .into_iter()
                .map(|v| number(RADII_ENV, v))
                .collect::<Result<_, _>>()?;
        }
        if let Some(s) = spacings {
            config.spacings_mm = split(SPACINGS_ENV, &s)?
                .into_iter()
                .map(|v| -> Result<(f64, f64), ConfigError> {
                    let (p, z) = v.split_once(':').ok_or_else(|| ConfigError::Pair {
                        key: SPACINGS_ENV,
                        value: v.to_owned(),
                    })?;
                    Ok((number(SPACINGS_ENV, p)?, number(SPACINGS_ENV, z)?))
                })
                .collect::<Result<_, _>>()?;
        }
        Ok(config)
    }
}

/// 按逗号切分, 去掉空白与空项.
fn split<'a>(key: &'static str, s: &'a str) -> Result<Vec<&'a str>, ConfigError> {
    let items: Vec<&str> = s.split(',').map(str::trim).filter(|v| !v.is_empty()).collect();
    if items.is_empty() {
        return Err(ConfigError::Empty(key));
    }
    Ok(items)
}

/// 解析单个有限正数.
fn number(key: &'static str, s: &str) -> Result<f64, ConfigError> {
    let value: f64 = s.trim().parse().map_err(|_| ConfigError::Number {
        key,
        value: s.to_owned(),
    })?;
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NonPositive { key, value });
    }
    Ok(value)
}
