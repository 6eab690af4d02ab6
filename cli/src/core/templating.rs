//! # newprogram Option-Code Templates
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Generates the C fragments that turn the stock `mainC`, `goptH` and `goptC`
//! files into a working option parser for a declared list of options.
//!
//! ## Architecture
//!
//! An option list is a space separated list of words. In each word:
//! - the first character is the short option
//! - the rest is the long option name
//! - a `:` makes the argument required and `::` makes it optional
//!
//! `vverbose` declares `-v/--verbose` with no argument, `ooutput:` declares
//! `-o/--output` with a required argument, and `ccolour::` declares
//! `-c/--colour` with an optional one.
//!
//! Each fragment is rendered by its own Tera template over the parsed
//! [`OptionSpec`] list. Autoescaping is off because the output is C source.
//! The caller patches each fragment into its file at the matching marker.
//!
//! ## Examples
//!
//! ```rust
//! let options = templating::parse_option_list("vverbose ooutput:")?;
//! let code = OptionCode::render(&options, "Hello")?;
//! gopt_c.replace_all(b"/* short options target */", code.short_options.as_bytes(), 1024)?;
//! ```
//!
use crate::core::error::{NewProgramError, Result};
use anyhow::{anyhow, bail};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

/// Whether an option takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    None,
    Required,
    Optional,
}

impl ArgKind {
    /// The `has_arg` value of a `struct option` row.
    fn has_arg(self) -> u8 {
        match self {
            ArgKind::None => 0,
            ArgKind::Required => 1,
            ArgKind::Optional => 2,
        }
    }
}

/// One declared command-line option of the generated program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub short: char,
    pub long: String,
    pub arg: ArgKind,
}

impl OptionSpec {
    /// Parses a single option word such as `ooutput:`.
    pub fn parse(word: &str) -> Result<Self> {
        let (body, arg) = match word.find(':') {
            None => (word, ArgKind::None),
            Some(at) => match &word[at..] {
                ":" => (&word[..at], ArgKind::Required),
                "::" => (&word[..at], ArgKind::Optional),
                _ => bail!(NewProgramError::ArgumentParsing(format!(
                    "option word '{}' may only end in ':' or '::'",
                    word
                ))),
            },
        };

        let mut chars = body.chars();
        let short = match chars.next() {
            Some(c) if c.is_ascii_alphanumeric() => c,
            _ => bail!(NewProgramError::ArgumentParsing(format!(
                "option word '{}' must start with a letter or digit",
                word
            ))),
        };
        let long = chars.as_str();
        if long.is_empty() {
            bail!(NewProgramError::ArgumentParsing(format!(
                "option word '{}' has no long option name",
                word
            )));
        }
        Ok(Self {
            short,
            long: long.to_string(),
            arg,
        })
    }

    /// Name of the struct member holding this option's value.
    pub fn data_name(&self) -> String {
        format!("opts.o_{}", self.short)
    }
}

/// Parses a whole option list, keeping the declared order.
pub fn parse_option_list(list: &str) -> Result<Vec<OptionSpec>> {
    list.split_whitespace().map(OptionSpec::parse).collect()
}

#[derive(Serialize)]
struct OptionView<'a> {
    short: char,
    long: &'a str,
    arg: ArgKind,
    data: String,
    has_arg: u8,
}

impl<'a> From<&'a OptionSpec> for OptionView<'a> {
    fn from(spec: &'a OptionSpec) -> Self {
        Self {
            short: spec.short,
            long: &spec.long,
            arg: spec.arg,
            data: spec.data_name(),
            has_arg: spec.arg.has_arg(),
        }
    }
}

const MAIN_PRINTOUT: &str = "{% for o in options %}\
\tif ({{ o.data }}) printf(\"{% if o.arg == \"none\" %}%d{% else %}%s{% endif %}\\n\", {{ o.data }});\
\t// -{{ o.short }}, --{{ o.long }}\n\
{% endfor %}";

const HEADER_MEMBERS: &str = "{% for o in options %}\
\t{% if o.arg == \"none\" %}int\t {% else %}char\t*{% endif %}o_{{ o.short }};\
\t// -{{ o.short }}, --{{ o.long }}\n\
{% endfor %}";

const SHORT_OPTIONS: &str = "{% for o in options %}\
{{ o.short }}{% if o.arg == \"required\" %}:{% elif o.arg == \"optional\" %}::{% endif %}\
{% endfor %}";

const LONG_OPTIONS: &str = "{% for o in options %}\
\t\t{\"{{ o.long }}\",\t{{ o.has_arg }},\t0,\t'{{ o.short }}'},\n\
{% endfor %}";

const OPTION_CASES: &str = "{% for o in options %}\
\t\tcase '{{ o.short }}':\n\
\t\t\t{% if o.arg == \"none\" %}{{ o.data }} = 1\
{% elif o.arg == \"required\" %}{{ o.data }} = xstrdup(optarg)\
{% else %}if (optarg) {{ o.data }} = xstrdup(optarg){% endif %};\n\
\t\t\tbreak;\n\
{% endfor %}";

const HELP_LINES: &str = "{% for o in options %}\
\x20 \"\\t-{{ o.short }}, --{{ o.long }} \
{% if o.arg == \"required\" %}options_argument\
{% elif o.arg == \"optional\" %}(optional) options_argument{% endif %}\\n\"\n\
\x20 \"\\t{% if o.arg == \"none\" %}Sets {{ o.data }} to 1, the default is 0.\
{% elif o.arg == \"required\" %}Copies optarg to {{ o.data }}, default is NULL.\
{% else %}If optarg is provided, copies it to {{ o.data }}, default value is NULL.{% endif %}\
\\n\\n\"\n\
{% endfor %}";

const SYNOPSIS: &str = "  \"\\t\\t{{ program }} [option] program_name\\n\\n\"\n\
\x20 \"\\tDESCRIPTION\\n\"\n\
\x20 \"\\tMake necessary explanation of the purpose and features of the program.\"\n";

/// All generated fragments for one option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCode {
    /// Printout lines for the main source.
    pub main_printout: String,
    /// `options_t` members for `gopt.h`.
    pub header_members: String,
    /// The `getopt_long` short option string.
    pub short_options: String,
    /// `struct option` rows.
    pub long_options: String,
    /// `case` blocks for the option switch.
    pub option_cases: String,
    /// Help text lines.
    pub help_lines: String,
    /// Synopsis and description; rendered once for the whole program.
    pub synopsis: String,
}

impl OptionCode {
    /// Renders every fragment for `options`. `program` is the project name as
    /// the user typed it and only appears in the synopsis.
    pub fn render(options: &[OptionSpec], program: &str) -> Result<Self> {
        let views: Vec<OptionView> = options.iter().map(OptionView::from).collect();
        let mut context = Context::new();
        context.insert("options", &views);
        context.insert("program", program);

        debug!("Rendering option code for {} options", options.len());
        Ok(Self {
            main_printout: render(MAIN_PRINTOUT, &context, "main printout")?,
            header_members: render(HEADER_MEMBERS, &context, "header members")?,
            short_options: render(SHORT_OPTIONS, &context, "short options")?,
            long_options: render(LONG_OPTIONS, &context, "long options")?,
            option_cases: render(OPTION_CASES, &context, "option cases")?,
            help_lines: render(HELP_LINES, &context, "help lines")?,
            synopsis: render(SYNOPSIS, &context, "synopsis")?,
        })
    }
}

fn render(template: &str, context: &Context, what: &str) -> Result<String> {
    Tera::one_off(template, context, false).map_err(|e| {
        anyhow!(NewProgramError::Template { source: e })
            .context(format!("Tera rendering failed for the {} template", what))
    })
}
