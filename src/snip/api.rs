//! # API Facade
//!
//! `SnipApi` is the single entry point for snippet operations. It owns what
//! one invocation resolved up front (store roots, configuration) plus the
//! per-session warning state, and dispatches to `commands/*.rs`.
//!
//! External processes are passed in as trait objects, so the same calls work
//! with the real editor, finder and prompt or with test fakes.
//!
//! The API does no I/O of its own: no printing, no exit codes. Results come
//! back as [`CmdResult`] values for the UI to render.

use crate::clipboard::Clipboard;
use crate::commands;
use crate::config::SnipConfig;
use crate::editor::Editor;
use crate::error::Result;
use crate::model::ScopeFilter;
use crate::prompt::Prompt;
use crate::session::Session;
use crate::store::StorePaths;

pub use crate::commands::save::SaveRequest;
pub use crate::commands::search::SearchTools;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct SnipApi {
    paths: StorePaths,
    config: SnipConfig,
    session: Session,
}

impl SnipApi {
    pub fn new(paths: StorePaths, config: SnipConfig) -> Self {
        Self {
            paths,
            config,
            session: Session::new(),
        }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn config(&self) -> &SnipConfig {
        &self.config
    }

    pub fn save(&mut self, editor: Option<&dyn Editor>, request: SaveRequest) -> Result<CmdResult> {
        commands::save::run(&self.paths, &mut self.session, editor, request)
    }

    pub fn edit(&self, editor: &dyn Editor, name: &str, filter: ScopeFilter) -> Result<CmdResult> {
        commands::edit::run(&self.paths, editor, name, filter)
    }

    pub fn delete(
        &self,
        prompt: Option<&mut dyn Prompt>,
        name: &str,
        filter: ScopeFilter,
    ) -> Result<CmdResult> {
        commands::delete::run(&self.paths, prompt, name, filter)
    }

    pub fn duplicate(
        &mut self,
        editor: Option<&dyn Editor>,
        name: &str,
        filter: ScopeFilter,
    ) -> Result<CmdResult> {
        commands::duplicate::run(&self.paths, &mut self.session, editor, name, filter)
    }

    pub fn search(
        &mut self,
        tools: SearchTools<'_>,
        filter: ScopeFilter,
        query: &str,
    ) -> Result<CmdResult> {
        commands::search::run(
            &self.paths,
            &mut self.session,
            tools,
            filter,
            self.config.preview_length,
            query,
        )
    }

    pub fn list(&self, filter: ScopeFilter, pattern: Option<&str>) -> Result<CmdResult> {
        commands::list::run(&self.paths, filter, pattern)
    }

    pub fn path(&self, name: &str, filter: ScopeFilter) -> Result<CmdResult> {
        commands::path::run(&self.paths, name, filter)
    }

    pub fn expand(&self, name: &str, filter: ScopeFilter) -> Result<CmdResult> {
        commands::expand::run(&self.paths, name, filter)
    }

    pub fn exec(&self, name: &str, filter: ScopeFilter, args: &[String]) -> Result<CmdResult> {
        let shell = self.config.shell_command();
        commands::exec::run(&self.paths, &shell, name, filter, args)
    }

    pub fn yank(&self, clipboard: &Clipboard, name: &str, filter: ScopeFilter) -> Result<CmdResult> {
        commands::yank::run(&self.paths, clipboard, name, filter)
    }

    pub fn abbr_list(&self, filter: ScopeFilter) -> Result<CmdResult> {
        commands::abbr::list(&self.paths, filter)
    }

    pub fn abbr_load(&self, filter: ScopeFilter) -> Result<CmdResult> {
        commands::abbr::load(&self.paths, filter)
    }
}
