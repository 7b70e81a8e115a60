use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::export::ExportError;
use crate::i18n::{self, Translator};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("내보내기 오류: {0}")]
    Export(#[from] ExportError),
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Compare => ui_cli::handle_compare(tr, config)?,
            MenuChoice::Curve => ui_cli::handle_curve(tr, config)?,
            MenuChoice::Cycle => ui_cli::handle_cycle(tr, config)?,
            MenuChoice::Model(slot) => ui_cli::handle_model(tr, config, slot)?,
            MenuChoice::Export => ui_cli::handle_export(tr, config)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    let resolved = i18n::resolve_language(&config.language, None);
                    *tr =
                        Translator::new_with_pack(&resolved, config.language_pack_dir.as_deref());
                }
                config.save()?;
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
