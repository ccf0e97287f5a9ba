//! CLI argument parsing with clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Classify web form fields and extract one-time passcodes.
///
/// Reads field/form descriptors or message text, prints JSON results.
/// Use `serve` to run the engine as a JSON-lines filter over stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "fieldsense", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON config file [default: $FIELDSENSE_CONFIG, then <config dir>/fieldsense/config.json]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimum score for a field type to be reported
    #[arg(long, global = true, value_name = "0..1")]
    pub field_threshold: Option<f32>,

    /// Minimum score for a form type to be reported
    #[arg(long, global = true, value_name = "0..1")]
    pub form_threshold: Option<f32>,

    /// Minimum confidence for an extracted passcode
    #[arg(long, global = true, value_name = "0..1")]
    pub otp_threshold: Option<f32>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify a single input field from its attributes
    #[command(after_help = "\
Examples:
  fieldsense classify-field --name user_email --type text --autocomplete email
  fieldsense classify-field --name card-no --type tel
  fieldsense classify-field --label 'Confirm password' --type password
  fieldsense classify-field --id otp --field-threshold 0.4")]
    ClassifyField(ClassifyFieldArgs),

    /// Classify a form from a FormDescriptor JSON document
    #[command(after_help = "\
Examples:
  fieldsense classify-form form.json    # Read descriptor from a file
  cat form.json | fieldsense classify-form -
  fieldsense classify-form --form-threshold 0.3 profile.json")]
    ClassifyForm(ClassifyFormArgs),

    /// Extract a one-time passcode from message text
    #[command(after_help = "\
Examples:
  fieldsense extract-otp 'Your verification code is 482913.'
  fieldsense extract-otp --source sms 'OTP: 4829'
  cat message.txt | fieldsense extract-otp --source email")]
    ExtractOtp(ExtractOtpArgs),

    /// Answer JSON-line requests on stdin until EOF
    #[command(after_help = "\
Each input line is a request, each output line the matching response:
  {\"id\":\"1\",\"command\":{\"action\":\"extract_otp\",\"text\":\"code is 1234\"}}

Actions: classify_field, classify_form, extract_otp, show_config")]
    Serve,

    /// Print the effective thresholds
    Config,

    /// Show an end-to-end usage example
    Examples,
}

#[derive(Debug, clap::Args)]
pub struct ClassifyFieldArgs {
    /// Locator echoed back in the result
    #[arg(long, default_value = "field")]
    pub selector: String,

    /// Declared input kind (text, email, password, tel, ...)
    #[arg(short = 't', long = "type", value_name = "KIND")]
    pub declared_type: Option<String>,

    /// `name` attribute
    #[arg(short, long)]
    pub name: Option<String>,

    /// `id` attribute
    #[arg(long)]
    pub id: Option<String>,

    /// Visible label text
    #[arg(short, long)]
    pub label: Option<String>,

    /// Placeholder text
    #[arg(short, long)]
    pub placeholder: Option<String>,

    /// `autocomplete` attribute (may hold several tokens)
    #[arg(short, long)]
    pub autocomplete: Option<String>,

    /// Mark the field as required
    #[arg(long)]
    pub required: bool,
}

#[derive(Debug, clap::Args)]
pub struct ClassifyFormArgs {
    /// FormDescriptor JSON file, or `-` for stdin
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

#[derive(Debug, clap::Args)]
pub struct ExtractOtpArgs {
    /// Message text [default: read stdin]
    pub text: Option<String>,

    /// Where the text came from (echoed back, not interpreted)
    #[arg(short, long, value_enum)]
    pub source: Option<Source>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Source {
    Email,
    Sms,
    Manual,
}

/// End-to-end example text for the `examples` command.
pub const EXAMPLES_TEXT: &str = r##"End-to-end example: detect a sign-up form and read the emailed code

# 1. Check what a single field is for
fieldsense classify-field --name user_email --type text --autocomplete email
#    -> "type": "email", "confidence": 0.8

# 2. Describe the whole form as JSON
cat > form.json <<'EOF'
{
  "selector": "form#register",
  "actionUrl": "https://example.com/register",
  "fields": [
    { "selector": "#email", "name": "email", "type": "email" },
    { "selector": "#password", "name": "password", "type": "password" }
  ]
}
EOF

# 3. Classify it (field verdicts are included)
fieldsense classify-form form.json
#    -> "type": "signup", "confidence": 1.0

# 4. Pull the passcode out of the confirmation mail
fieldsense extract-otp --source email "Your verification code is 482913."
#    -> "extractedValue": "482913", "patternName": "natural-language"

# 5. Or keep one process running and talk JSON lines to it
fieldsense serve <<'EOF'
{"id":"1","command":{"action":"extract_otp","text":"OTP: 4829","source":"sms"}}
{"id":"2","command":{"action":"show_config"}}
EOF

Thresholds come from --config, $FIELDSENSE_CONFIG or <config dir>/fieldsense/config.json,
then FIELDSENSE_{FIELD,FORM,OTP}_THRESHOLD, then the --*-threshold flags.
Set RUST_LOG=fieldsense_core=debug to see why a result was chosen.
"##;
