//! Runtime options for the text front end, changed with `setoption`.

/// Option kinds understood by `setoption`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionType {
    Check { default: bool },
}

/// Individual option definition
#[derive(Debug, Clone)]
pub struct SessionOption {
    pub name: &'static str,
    pub opt_type: OptionType,
}

pub const OPTIONS: [SessionOption; 3] = [
    SessionOption {
        name: "Debug",
        opt_type: OptionType::Check { default: false },
    },
    SessionOption {
        name: "Glyphs",
        opt_type: OptionType::Check { default: false },
    },
    SessionOption {
        name: "AutoShow",
        opt_type: OptionType::Check { default: false },
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionOptions {
    /// Emit `info string` diagnostics for selections and applied moves
    pub debug: bool,

    /// Render pieces as Unicode chess symbols instead of FEN letters
    pub glyphs: bool,

    /// Print the board after every applied move
    pub auto_show: bool,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set option value. Names match case-insensitively.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), String> {
        let slot = match name.to_ascii_lowercase().as_str() {
            "debug" => &mut self.debug,
            "glyphs" => &mut self.glyphs,
            "autoshow" => &mut self.auto_show,
            _ => return Err(format!("unknown option: {}", name)),
        };
        *slot = parse_check(name, value)?;
        Ok(())
    }

    /// `option ...` lines describing every option and its default
    pub fn describe() -> Vec<String> {
        OPTIONS
            .iter()
            .map(|opt| match opt.opt_type {
                OptionType::Check { default } => {
                    format!("option name {} type check default {}", opt.name, default)
                }
            })
            .collect()
    }
}

fn parse_check(name: &str, value: Option<&str>) -> Result<bool, String> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("true") | Some("on") | Some("1") => Ok(true),
        Some("false") | Some("off") | Some("0") => Ok(false),
        Some(other) => Err(format!("invalid value for option {}: {}", name, other)),
        None => Err(format!("option {} requires a value", name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_defaults() {
        let options = SessionOptions::new();
        assert!(!options.debug);
        assert!(!options.glyphs);
        assert!(!options.auto_show);
    }

    #[test]
    fn test_set_check_options() {
        let mut options = SessionOptions::new();
        options.set_option("Debug", Some("true")).unwrap();
        options.set_option("autoshow", Some("on")).unwrap();
        assert!(options.debug);
        assert!(options.auto_show);
        options.set_option("DEBUG", Some("0")).unwrap();
        assert!(!options.debug);
    }

    #[test]
    fn test_bad_options_are_reported() {
        let mut options = SessionOptions::new();
        assert_eq!(
            options.set_option("Hash", Some("16")).unwrap_err(),
            "unknown option: Hash"
        );
        assert_eq!(
            options.set_option("Glyphs", Some("maybe")).unwrap_err(),
            "invalid value for option Glyphs: maybe"
        );
        assert_eq!(
            options.set_option("Glyphs", None).unwrap_err(),
            "option Glyphs requires a value"
        );
        assert_eq!(options, SessionOptions::new());
    }

    #[test]
    fn test_describe_lists_every_option() {
        let lines = SessionOptions::describe();
        assert_eq!(lines.len(), OPTIONS.len());
        assert_eq!(lines[0], "option name Debug type check default false");
    }
}
