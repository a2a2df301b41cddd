//! Complete target platform model.
//!
//! Assembles the boards, platform and programmers files of one platform
//! directory into a [`TargetPlatform`].

use std::path::{Path, PathBuf};

use hwtarget_prefs::{ConfigFileLoader, FileSource, FsSource, KeyPathMap};
use serde::Serialize;

use crate::board::{Board, Programmer};
use crate::error::Result;

/// Mandatory board definitions; its absence means "not a platform".
pub const BOARDS_FILE: &str = "boards.txt";
/// Optional platform-wide preferences.
pub const PLATFORM_FILE: &str = "platform.txt";
/// Optional programmer definitions.
pub const PROGRAMMERS_FILE: &str = "programmers.txt";

/// Reserved first-level key of the boards file holding custom menus.
const MENU_NAMESPACE: &str = "menu";

/// A vendor's board-family definition bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetPlatform {
    /// Caller-supplied identifier.
    name: String,
    /// Directory the definitions were read from.
    folder: PathBuf,
    /// Boards in declaration order.
    boards: Vec<Board>,
    /// Programmers in declaration order.
    programmers: Vec<Programmer>,
    /// The `menu` subtree of the boards file.
    custom_menus: KeyPathMap,
    /// Platform-wide defaults.
    preferences: KeyPathMap,
}

impl TargetPlatform {
    /// Assemble the platform in `folder` from the real filesystem.
    pub fn load(name: impl Into<String>, folder: impl Into<PathBuf>) -> Result<Self> {
        PlatformAssembler::new(FsSource).assemble(name, folder)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// All boards, in the order they were first declared.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id() == id)
    }

    /// All programmers, in the order they were first declared.
    pub fn programmers(&self) -> &[Programmer] {
        &self.programmers
    }

    pub fn programmer(&self, id: &str) -> Option<&Programmer> {
        self.programmers.iter().find(|p| p.id() == id)
    }

    pub fn preferences(&self) -> &KeyPathMap {
        &self.preferences
    }

    /// Custom menu declarations, with the `menu.` prefix stripped.
    pub fn custom_menus(&self) -> &KeyPathMap {
        &self.custom_menus
    }

    /// Settings of tool `tool_id`, i.e. `tools.<tool_id>.*` of the platform
    /// preferences. Empty if the tool is not configured.
    pub fn tool(&self, tool_id: &str) -> KeyPathMap {
        self.preferences.sub_tree("tools").sub_tree(tool_id)
    }

    /// IDs of the declared custom menus, in declaration order.
    pub fn custom_menu_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for key in self.custom_menus.keys() {
            let id = key.split('.').next().unwrap_or(key);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Display title of custom menu `menu_id` (`menu.<menu_id>=title`).
    pub fn custom_menu_title(&self, menu_id: &str) -> Option<&str> {
        self.custom_menus.get(menu_id)
    }
}

/// Builds [`TargetPlatform`]s from definition files read through a
/// [`FileSource`].
#[derive(Debug, Clone, Default)]
pub struct PlatformAssembler<S = FsSource> {
    loader: ConfigFileLoader<S>,
}

impl<S: FileSource> PlatformAssembler<S> {
    pub fn new(source: S) -> Self {
        Self {
            loader: ConfigFileLoader::new(source),
        }
    }

    /// The underlying file source.
    pub fn source(&self) -> &S {
        self.loader.source()
    }

    /// Assemble the platform stored in `folder` under the name `name`.
    ///
    /// Fails if the boards file is absent or any present file is malformed.
    /// Absent platform and programmers files leave their parts empty.
    pub fn assemble(
        &self,
        name: impl Into<String>,
        folder: impl Into<PathBuf>,
    ) -> Result<TargetPlatform> {
        let name = name.into();
        let folder = folder.into();

        let mut board_prefs = self.loader.load_mandatory(&folder.join(BOARDS_FILE))?;

        // The menu namespace must go before the split or it becomes a board.
        let mut custom_menus = KeyPathMap::new();
        if board_prefs.has_group(MENU_NAMESPACE) {
            custom_menus = board_prefs.sub_tree(MENU_NAMESPACE);
            board_prefs.remove_subtree(MENU_NAMESPACE);
        }

        let boards: Vec<Board> = board_prefs
            .first_level_split()
            .into_iter()
            .map(|(id, prefs)| Board::new(id, prefs))
            .collect();

        let preferences = self.loader.load_optional(&folder.join(PLATFORM_FILE))?;

        let programmers: Vec<Programmer> = self
            .loader
            .load_optional(&folder.join(PROGRAMMERS_FILE))?
            .first_level_split()
            .into_iter()
            .map(|(id, prefs)| Programmer::new(id, prefs))
            .collect();

        log::debug!(
            "assembled platform '{}' from {}: {} boards, {} programmers, {} custom menu entries",
            name,
            folder.display(),
            boards.len(),
            programmers.len(),
            custom_menus.len()
        );

        Ok(TargetPlatform {
            name,
            folder,
            boards,
            programmers,
            custom_menus,
            preferences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwtarget_prefs::MemorySource;
    use pretty_assertions::assert_eq;

    const DIR: &str = "/hardware/arduino/avr";

    fn path(file: &str) -> PathBuf {
        Path::new(DIR).join(file)
    }

    fn assemble(source: MemorySource) -> Result<TargetPlatform> {
        PlatformAssembler::new(source).assemble("arduino:avr", DIR)
    }

    #[test]
    fn menu_namespace_is_not_a_board() {
        let source = MemorySource::new().with_file(
            path(BOARDS_FILE),
            "menu.view.label=Menu\nuno.name=Arduino Uno\n",
        );
        let platform = assemble(source).unwrap();

        assert_eq!(platform.custom_menus().get("view.label"), Some("Menu"));
        assert_eq!(platform.boards().len(), 1);
        let uno = platform.board("uno").unwrap();
        assert_eq!(uno.preferences().get("name"), Some("Arduino Uno"));
        assert!(platform.board("menu").is_none());
    }

    #[test]
    fn missing_boards_file_fails() {
        let source = MemorySource::new().with_file(path(PLATFORM_FILE), "name=AVR\n");
        let err = assemble(source).unwrap_err();
        assert!(err.is_missing_file());
    }

    #[test]
    fn empty_boards_file_is_valid() {
        let source = MemorySource::new().with_file(path(BOARDS_FILE), "");
        let platform = assemble(source).unwrap();
        assert!(platform.boards().is_empty());
        assert!(platform.custom_menus().is_empty());
    }

    #[test]
    fn optional_files_default_to_empty() {
        let source = MemorySource::new().with_file(path(BOARDS_FILE), "uno.name=Uno\n");
        let platform = assemble(source).unwrap();
        assert!(platform.preferences().is_empty());
        assert!(platform.programmers().is_empty());
        assert!(platform.tool("avrdude").is_empty());
    }

    #[test]
    fn name_and_folder_come_from_caller() {
        let source = MemorySource::new().with_file(path(BOARDS_FILE), "uno.name=Uno\n");
        let platform = assemble(source).unwrap();
        assert_eq!(platform.name(), "arduino:avr");
        assert_eq!(platform.folder(), Path::new(DIR));
    }

    #[test]
    fn boards_keep_declaration_order() {
        let source = MemorySource::new().with_file(
            path(BOARDS_FILE),
            "yun.name=Yun\nuno.name=Uno\nyun.build.mcu=atmega32u4\nmega.name=Mega\n",
        );
        let platform = assemble(source).unwrap();
        let ids: Vec<&str> = platform.boards().iter().map(Board::id).collect();
        assert_eq!(ids, vec!["yun", "uno", "mega"]);
        assert_eq!(
            platform.board("yun").unwrap().preferences().get("build.mcu"),
            Some("atmega32u4")
        );
    }

    #[test]
    fn platform_preferences_are_not_split() {
        let source = MemorySource::new()
            .with_file(path(BOARDS_FILE), "uno.name=Uno\n")
            .with_file(
                path(PLATFORM_FILE),
                "name=Arduino AVR Boards\ncompiler.c.cmd=avr-gcc\n",
            );
        let platform = assemble(source).unwrap();
        assert_eq!(platform.preferences().len(), 2);
        assert_eq!(platform.preferences().get("name"), Some("Arduino AVR Boards"));
        assert_eq!(platform.preferences().get("compiler.c.cmd"), Some("avr-gcc"));
    }

    #[test]
    fn programmers_are_split_by_id() {
        let source = MemorySource::new()
            .with_file(path(BOARDS_FILE), "uno.name=Uno\n")
            .with_file(
                path(PROGRAMMERS_FILE),
                "avrisp.name=AVR ISP\navrisp.protocol=stk500v1\nusbasp.name=USBasp\n",
            );
        let platform = assemble(source).unwrap();
        assert_eq!(platform.programmers().len(), 2);
        let isp = platform.programmer("avrisp").unwrap();
        assert_eq!(isp.preferences().get("protocol"), Some("stk500v1"));
        assert_eq!(platform.programmer("usbasp").unwrap().name(), Some("USBasp"));
        assert!(platform.programmer("stk500").is_none());
    }

    #[test]
    fn tool_is_two_level_lookup() {
        let source = MemorySource::new()
            .with_file(path(BOARDS_FILE), "uno.name=Uno\n")
            .with_file(
                path(PLATFORM_FILE),
                "tools.avrdude.upload.pattern=\"{cmd.path}\" -p{build.mcu}\ntools.avrdude.cmd.path=/usr/bin/avrdude\ntools.bossac.cmd=bossac\n",
            );
        let platform = assemble(source).unwrap();
        let avrdude = platform.tool("avrdude");
        assert_eq!(avrdude.len(), 2);
        assert_eq!(
            avrdude.get("upload.pattern"),
            Some("\"{cmd.path}\" -p{build.mcu}")
        );
        assert!(platform.tool("esptool").is_empty());
    }

    #[test]
    fn malformed_optional_file_fails_assembly() {
        let source = MemorySource::new()
            .with_file(path(BOARDS_FILE), "uno.name=Uno\n")
            .with_file(path(PROGRAMMERS_FILE), "avrisp.name=AVR ISP\nbroken line\n");
        let err = assemble(source).unwrap_err();
        assert!(err.is_parse());
        assert!(!err.is_missing_file());
    }

    #[test]
    fn custom_menu_ids_and_titles() {
        let source = MemorySource::new().with_file(
            path(BOARDS_FILE),
            "menu.cpu=Processor\nmenu.speed=Speed\nuno.name=Uno\nmenu.cpu.extra=x\nmenu.clock.fast=Fast\n",
        );
        let platform = assemble(source).unwrap();
        assert_eq!(platform.custom_menu_ids(), vec!["cpu", "speed", "clock"]);
        assert_eq!(platform.custom_menu_title("cpu"), Some("Processor"));
        assert_eq!(platform.custom_menu_title("clock"), None);
    }

    #[test]
    fn reassembly_after_adding_boards_file() {
        let mut source = MemorySource::new();
        let assembler = PlatformAssembler::new(&source);
        assert!(assembler.assemble("p", DIR).unwrap_err().is_missing_file());

        source.insert(path(BOARDS_FILE), "");
        let platform = PlatformAssembler::new(&source).assemble("p", DIR).unwrap();
        assert!(platform.boards().is_empty());
    }
}
