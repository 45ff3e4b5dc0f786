use std::path::{ Path, PathBuf };
use serde::Deserialize ;
use thiserror::Error ;

use crate::hooks::HookNames ;



#[derive( Debug, Error )]
pub enum ConfigError {
    #[error( "Failed to read config file '{}': {}", .0.display(), .1 )]
    Io( PathBuf, std::io::Error ),
    #[error( "Failed to parse config file '{}': {}", .0.display(), .1 )]
    Parse( PathBuf, toml::de::Error ),
}

/// Startup configuration.
///
/// Every field has a default, so an empty file (or no file at all) gives the
/// standard layout: `core` then `mods` relative to the working directory,
/// platform shared libraries, `module_init` / `module_exec` hooks.
///
/// ```toml
/// roots = [ "core", "mods", "/opt/extra-mods" ]
/// extension = "so"
/// host_executable = "server"
///
/// [hooks]
/// init = "module_init"
/// exec = "module_exec"
/// ```
#[derive( Debug, Clone, PartialEq, Eq, Deserialize )]
#[serde( default )]
pub struct LoaderConfig {
    /// Scan roots, loaded one after the other.
    pub roots: Vec<PathBuf>,
    /// Extension (without the dot) that marks a file as a module.
    pub extension: String,
    /// Hook symbol names.
    pub hooks: HookNames,
    /// When set, modules are only loaded inside an executable with this file name.
    pub host_executable: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            roots: vec![ PathBuf::from( "core" ), PathBuf::from( "mods" ) ],
            extension: std::env::consts::DLL_EXTENSION.to_string(),
            hooks: HookNames::default(),
            host_executable: None,
        }
    }
}

impl LoaderConfig {

    pub fn from_file( path: &Path ) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string( path ).map_err(| err | ConfigError::Io( path.to_path_buf(), err ))?;
        toml::from_str( &data ).map_err(| err | ConfigError::Parse( path.to_path_buf(), err ))
    }

    /// Whether `executable` is a process this configuration should load
    /// modules into.
    pub fn applies_to( &self, executable: &Path ) -> bool {
        match &self.host_executable {
            None => true,
            Some( expected ) => executable.file_name().is_some_and(| name | name == expected.as_str() ),
        }
    }

}

#[cfg( test )]
mod tests {

    use super::* ;

    #[test]
    fn empty_config_uses_defaults() {
        let config: LoaderConfig = toml::from_str( "" ).unwrap();
        assert_eq!( config, LoaderConfig::default() );
        assert_eq!( config.roots, vec![ PathBuf::from( "core" ), PathBuf::from( "mods" ) ]);
        assert_eq!( config.hooks.init, "module_init" );
        assert_eq!( config.hooks.exec, "module_exec" );
    }

    #[test]
    fn partial_hook_table_keeps_other_default() {
        let config: LoaderConfig = toml::from_str( "extension = \"plugin\"\n[hooks]\ninit = \"start\"\n" ).unwrap();
        assert_eq!( config.extension, "plugin" );
        assert_eq!( config.hooks.init, "start" );
        assert_eq!( config.hooks.exec, "module_exec" );
    }

    #[test]
    fn host_executable_filter() {
        let config = LoaderConfig { host_executable: Some( "server".to_string() ), ..LoaderConfig::default() };
        assert!( config.applies_to( Path::new( "/opt/game/server" )));
        assert!( !config.applies_to( Path::new( "/usr/bin/python3" )));
        assert!( LoaderConfig::default().applies_to( Path::new( "/usr/bin/python3" )));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = LoaderConfig::from_file( Path::new( "/nonexistent/native-link.toml" )).unwrap_err();
        assert!( matches!( err, ConfigError::Io( _, _ )));
    }

}
