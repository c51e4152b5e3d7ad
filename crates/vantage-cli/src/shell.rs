//! Interactive projection editor
//!
//! A line-oriented stand-in for a parameter-tweaking GUI: every edit goes
//! through `ProjectionRig`, which rejects invalid values and otherwise
//! recomputes the projection and refits the viewport.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, EditMode, Editor};
use std::path::{Path, PathBuf};
use vantage_core::{Parameter, ProjectionMode, ProjectionRig};

use crate::report::{format_output, format_parameters, format_viewport};
use crate::settings::{self, Settings};

/// Shell state that does not depend on the terminal
pub struct Session {
    rig: ProjectionRig,
    settings_path: Option<PathBuf>,
}

impl Session {
    /// Start a session from loaded settings
    pub fn new(settings: Settings, size: (u32, u32), settings_path: Option<PathBuf>) -> Result<Self> {
        let rig = ProjectionRig::with_parameters(
            vantage_core::FittedSurface::new(size.0, size.1),
            size,
            settings.mode,
            settings.parameters,
        )?;

        Ok(Self { rig, settings_path })
    }

    pub fn rig(&self) -> &ProjectionRig {
        &self.rig
    }

    /// Current settings, as they would be saved
    pub fn settings(&self) -> Settings {
        Settings {
            mode: self.rig.mode(),
            parameters: *self.rig.parameters(),
        }
    }

    /// Run one command line
    pub fn execute(&mut self, line: &str) -> CommandResult {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return CommandResult::Continue(String::new());
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "help" | "h" | "?" => CommandResult::Continue(HELP_MESSAGE.trim().to_string()),
            "quit" | "q" | "exit" => CommandResult::Exit,
            "show" | "s" => CommandResult::Continue(self.show()),
            "matrix" | "m" => CommandResult::Continue(self.matrix()),
            "mode" => match args.as_slice() {
                [name] => match name.parse::<ProjectionMode>() {
                    Ok(mode) => {
                        self.rig.set_mode(mode);
                        self.rig.update();
                        CommandResult::Continue(self.matrix())
                    }
                    Err(e) => CommandResult::Error(e.to_string()),
                },
                _ => CommandResult::Continue(format!(
                    "mode: {}\nUsage: mode <{}>",
                    self.rig.mode(),
                    ProjectionMode::all_names().join("|")
                )),
            },
            "set" => match args.as_slice() {
                [name, value] => self.set(name, value),
                _ => usage("set <parameter> <value>"),
            },
            "resize" => match parse_numbers::<u32, 2>(&args) {
                Some([width, height]) => {
                    self.rig.resize(width, height);
                    CommandResult::Continue(format_viewport(&self.rig.viewport()))
                }
                _ => usage("resize <width> <height>"),
            },
            "orbit" => match parse_numbers::<f32, 2>(&args) {
                Some([delta_yaw, delta_pitch]) => {
                    self.rig.orbit_mut().orbit(delta_yaw.to_radians(), delta_pitch.to_radians());
                    self.after_orbit()
                }
                _ => usage("orbit <yaw degrees> <pitch degrees>"),
            },
            "zoom" => match parse_numbers::<f32, 1>(&args) {
                Some([delta]) => {
                    self.rig.orbit_mut().zoom(delta);
                    self.after_orbit()
                }
                _ => usage("zoom <amount>"),
            },
            "reset" => {
                self.rig.reset();
                CommandResult::Continue(self.show())
            }
            "save" => self.save(args.first().map(Path::new)),
            "load" => match args.as_slice() {
                [path] => self.load(Path::new(path)),
                _ => usage("load <file>"),
            },
            _ => CommandResult::Error(format!(
                "Unknown command: {}. Type help for available commands.",
                command
            )),
        }
    }

    fn show(&self) -> String {
        let mut out = format_parameters(self.rig.mode(), self.rig.parameters());
        out.push_str(&format_viewport(&self.rig.viewport()));
        out
    }

    fn matrix(&self) -> String {
        let output = vantage_core::compute_projection(self.rig.mode(), self.rig.parameters());
        format_output(self.rig.mode(), &output, self.rig.viewport_aspect_ratio())
    }

    fn set(&mut self, name: &str, value: &str) -> CommandResult {
        let parameter = match name.parse::<Parameter>() {
            Ok(parameter) => parameter,
            Err(e) => return CommandResult::Error(e.to_string()),
        };
        let Ok(value) = value.parse::<f32>() else {
            return CommandResult::Error(format!("Not a number: {value}"));
        };

        match self.rig.set_parameter(parameter, value) {
            Ok(_) => {
                let mut out = format!("{parameter} = {value}");
                if !parameter.applies_to(self.rig.mode()) {
                    out.push_str(&format!(" (not used in {} mode)", self.rig.mode()));
                }
                CommandResult::Continue(out)
            }
            Err(e) => CommandResult::Error(format!(
                "{e}; keeping {parameter} = {}",
                self.rig.parameters().get(parameter)
            )),
        }
    }

    fn after_orbit(&mut self) -> CommandResult {
        if !self.rig.orbit_enabled() {
            return CommandResult::Continue(
                "Orbit input is ignored in isometric mode".to_string(),
            );
        }

        self.rig.update();
        let eye = self.rig.camera().position();
        CommandResult::Continue(format!(
            "camera at ({:.2}, {:.2}, {:.2}), distance {:.2}",
            eye.x,
            eye.y,
            eye.z,
            self.rig.orbit().distance()
        ))
    }

    fn save(&self, path: Option<&Path>) -> CommandResult {
        let target = match settings::save_target(path.or(self.settings_path.as_deref())) {
            Ok(target) => target,
            Err(e) => return CommandResult::Error(format!("{e:#}")),
        };

        match settings::save_settings(&self.settings(), &target) {
            Ok(()) => CommandResult::Continue(format!("Saved to {}", target.display())),
            Err(e) => CommandResult::Error(format!("{e:#}")),
        }
    }

    fn load(&mut self, path: &Path) -> CommandResult {
        let loaded = match settings::load_settings(path) {
            Ok(loaded) => loaded,
            Err(e) => return CommandResult::Error(format!("{e:#}")),
        };

        if let Err(e) = self.rig.set_parameters(loaded.parameters) {
            return CommandResult::Error(e.to_string());
        }
        self.rig.set_mode(loaded.mode);
        self.rig.update();
        self.settings_path = Some(path.to_path_buf());

        CommandResult::Continue(self.show())
    }
}

/// Result of handling a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    Continue(String),
    Exit,
    Error(String),
}

fn usage(text: &str) -> CommandResult {
    CommandResult::Error(format!("Usage: {text}"))
}

/// Parse exactly `N` whitespace-separated numbers
fn parse_numbers<T: std::str::FromStr, const N: usize>(args: &[&str]) -> Option<[T; N]> {
    if args.len() != N {
        return None;
    }
    let values: Vec<T> = args.iter().map(|a| a.parse().ok()).collect::<Option<_>>()?;
    values.try_into().ok()
}

/// Get the history file path
fn history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("vantage").join("shell_history"))
}

/// Entry point for the shell command
pub fn run_shell(settings: Settings, size: (u32, u32), settings_path: Option<PathBuf>) -> Result<()> {
    let mut session = Session::new(settings, size, settings_path)?;

    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();
    let mut editor: Editor<(), DefaultHistory> = Editor::with_config(config)?;

    let history = history_path();
    if let Some(ref path) = history {
        let _ = editor.load_history(path);
    }

    println!("{}", WELCOME_MESSAGE.trim());
    println!("{}", session.show());

    loop {
        let prompt = format!("{}> ", session.rig().mode());
        match editor.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                match session.execute(&line) {
                    CommandResult::Continue(out) => {
                        if !out.is_empty() {
                            println!("{out}");
                        }
                    }
                    CommandResult::Exit => break,
                    CommandResult::Error(e) => eprintln!("Error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use quit or Ctrl+D to exit");
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.save_history(path);
    }

    Ok(())
}

const WELCOME_MESSAGE: &str = r#"
Vantage projection shell. Type help for commands.
"#;

const HELP_MESSAGE: &str = r#"
Commands:
  mode <perspective|orthographic|isometric>  - Switch projection mode
  set <parameter> <value>                    - Edit a parameter
      parameters: fov, aspect, near, far, ortho_width, ortho_height
  show, s                                    - Show parameters and viewport
  matrix, m                                  - Show the projection matrix
  resize <width> <height>                    - Resize the render surface
  orbit <yaw> <pitch>                        - Orbit the camera (degrees)
  zoom <amount>                              - Zoom the orbit camera
  reset                                      - Restore default parameters
  save [file]                                - Save settings
  load <file>                                - Load settings
  help, h, ?                                 - Show this help message
  quit, q, exit                              - Exit the shell
"#;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vantage_core::ProjectionParameters;

    fn session() -> Session {
        Session::new(Settings::default(), (1280, 720), None).unwrap()
    }

    #[test]
    fn test_set_updates_parameters() {
        let mut session = session();
        let result = session.execute("set fov 45");
        assert_eq!(result, CommandResult::Continue("fov = 45".to_string()));
        assert_eq!(session.rig().parameters().vertical_fov_degrees, 45.0);
    }

    #[test]
    fn test_invalid_edit_is_reported_and_ignored() {
        let mut session = session();
        let result = session.execute("set near 2000");
        assert!(matches!(result, CommandResult::Error(ref e) if e.contains("keeping near = 1")));
        assert_eq!(session.rig().parameters(), &ProjectionParameters::default());
    }

    #[test]
    fn test_mode_switch() {
        let mut session = session();
        assert!(matches!(session.execute("mode iso"), CommandResult::Continue(_)));
        assert_eq!(session.rig().mode(), ProjectionMode::Isometric);
        assert!(matches!(session.execute("mode fisheye"), CommandResult::Error(_)));
    }

    #[test]
    fn test_orbit_ignored_in_isometric() {
        let mut session = session();
        session.execute("mode isometric");
        let result = session.execute("orbit 30 10");
        assert_eq!(
            result,
            CommandResult::Continue("Orbit input is ignored in isometric mode".to_string())
        );
    }

    #[test]
    fn test_resize_and_usage_errors() {
        let mut session = session();
        assert!(matches!(session.execute("resize 800 800"), CommandResult::Continue(_)));
        assert_eq!(session.rig().surface_size(), (800, 800));
        assert!(matches!(session.execute("resize 800"), CommandResult::Error(_)));
        assert!(matches!(session.execute("set fov"), CommandResult::Error(_)));
        assert!(matches!(session.execute("set fov wide"), CommandResult::Error(_)));
    }

    #[test]
    fn test_quit_and_unknown() {
        let mut session = session();
        assert_eq!(session.execute("quit"), CommandResult::Exit);
        assert!(matches!(session.execute("frobnicate"), CommandResult::Error(_)));
        assert_eq!(session.execute("   "), CommandResult::Continue(String::new()));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("vantage_shell_{}", std::process::id()))
            .join("settings.json");
        let path_str = path.to_string_lossy().to_string();

        let mut session = session();
        session.execute("mode ortho");
        session.execute("set width 1000");
        assert!(matches!(
            session.execute(&format!("save {path_str}")),
            CommandResult::Continue(_)
        ));

        let mut other = Session::new(Settings::default(), (1280, 720), None).unwrap();
        assert!(matches!(
            other.execute(&format!("load {path_str}")),
            CommandResult::Continue(_)
        ));
        assert_eq!(other.settings(), session.settings());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_numbers::<u32, 2>(&["3", "4"]), Some([3, 4]));
        assert_eq!(parse_numbers::<u32, 2>(&["3"]), None);
        assert_eq!(parse_numbers::<f32, 1>(&["x"]), None);
    }
}
