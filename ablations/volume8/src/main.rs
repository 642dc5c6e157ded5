//! 体积估计消融实验.
//!
//! 在已知解析体积的合成球形结节上, 比较鞋带公式, 三维掩膜体素计数,
//! 稀疏体素集合计数三种估计的误差与耗时.
//!
//! 用例由 `$VOLUME8_RADII_MM` 与 `$VOLUME8_SPACINGS_MM` 配置, 见 [`utils::config`].

mod profile;
mod result;
mod runner;

use log::LevelFilter;
use simple_logger::SimpleLogger;
use utils::config::Volume8Config;

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    let config = Volume8Config::from_env().unwrap_or_else(|e| panic!("{e}"));
    runner::run(&config).analyze();
}
