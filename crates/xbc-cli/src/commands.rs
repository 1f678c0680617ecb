use std::io::Read;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use serde_json::{json, Value};
use xbc_address::Base58AddressCodec;
use xbc_codec::{BinaryCodec, CodecContext, Hash256, LedgerHeader};
use xbc_definitions::{Definitions, FieldInfo};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::resolve(&cli)?;
    let custom;
    let definitions: &Definitions = match &config.definitions {
        Some(path) => {
            custom = load_definitions(path)?;
            &custom
        }
        None => Definitions::global(),
    };
    let addresses = Base58AddressCodec;
    let codec = BinaryCodec::new(CodecContext::new(definitions, &addresses));
    let out = Output {
        format: cli.format,
        config: &config,
    };

    match cli.command {
        Command::Decode(args) => out.json(&codec.decode(&read_input(&args)?)?),
        Command::Encode(args) => out.hex("blob", codec.encode(&read_json(&args)?)?),
        Command::EncodeForSigning(args) => {
            out.hex("signing_data", codec.encode_for_signing(&read_json(&args)?)?)
        }
        Command::EncodeForSigningClaim(args) => {
            out.hex("signing_data", codec.encode_for_signing_claim(&read_json(&args)?)?)
        }
        Command::EncodeForMultisigning(args) => out.hex(
            "signing_data",
            codec.encode_for_multisigning(&read_json(&args.input)?, &args.signer)?,
        ),
        Command::EncodeQuality(args) => out.hex("quality", codec.encode_quality(&args.value)?),
        Command::DecodeQuality(args) => out.text("quality", codec.decode_quality(&args.value)?),
        Command::DecodeLedgerData(args) => {
            out.json(&codec.decode_ledger_data(&read_input(&args)?)?)
        }
        Command::TxId(args) => out.hash("hash", codec.transaction_id(&read_input(&args)?)?),
        Command::LedgerHash(args) => {
            let header: LedgerHeader =
                serde_json::from_value(read_json(&args)?).context("parsing ledger header")?;
            out.hash("ledger_hash", codec.ledger_hash(&header)?)
        }
        Command::TxTreeHash(args) => {
            let items = read_array(&args)?;
            out.hash("transaction_hash", codec.transaction_tree_hash(&items)?)
        }
        Command::StateHash(args) => {
            let items = read_array(&args)?;
            out.hash("account_hash", codec.account_state_hash(&items)?)
        }
        Command::Field(args) => {
            let field = definitions
                .field(&args.name)
                .with_context(|| format!("unknown field: {}", args.name))?;
            out.field(field)
        }
    }
}

fn load_definitions(path: &Path) -> anyhow::Result<Definitions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading definitions {}", path.display()))?;
    let definitions = Definitions::from_json(&text)
        .with_context(|| format!("loading definitions {}", path.display()))?;
    tracing::debug!(path = %path.display(), "using alternate definitions");
    Ok(definitions)
}

fn read_input(args: &InputArgs) -> anyhow::Result<String> {
    let text = match (&args.value, &args.file) {
        (Some(value), _) => value.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    Ok(text.trim().to_string())
}

fn read_json(args: &InputArgs) -> anyhow::Result<Value> {
    serde_json::from_str(&read_input(args)?).context("input is not valid JSON")
}

fn read_array(args: &InputArgs) -> anyhow::Result<Vec<Value>> {
    match read_json(args)? {
        Value::Array(items) => Ok(items),
        _ => anyhow::bail!("expected a JSON array"),
    }
}

struct Output<'c> {
    format: OutputFormat,
    config: &'c CliConfig,
}

impl Output<'_> {
    fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let text = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{text}");
        Ok(())
    }

    fn text(&self, key: &str, value: String) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Text => {
                println!("{value}");
                Ok(())
            }
            OutputFormat::Json => self.json(&json!({ key: value })),
        }
    }

    fn hex(&self, key: &str, hex: String) -> anyhow::Result<()> {
        self.text(key, apply_case(hex, self.config.uppercase_hex))
    }

    fn hash(&self, key: &str, hash: Hash256) -> anyhow::Result<()> {
        self.hex(key, hash.to_hex())
    }

    fn field(&self, field: &FieldInfo) -> anyhow::Result<()> {
        let header = apply_case(
            field.header.iter().map(|b| format!("{b:02X}")).collect(),
            self.config.uppercase_hex,
        );
        match self.format {
            OutputFormat::Json => self.json(&json!({
                "name": field.name,
                "type": field.type_name,
                "type_code": field.type_code,
                "nth": field.nth,
                "ordinal": field.ordinal,
                "header": header,
                "is_vl_encoded": field.is_vl_encoded,
                "is_serialized": field.is_serialized,
                "is_signing_field": field.is_signing_field,
            })),
            OutputFormat::Text => {
                println!("{} {}", field.name.bold(), format!("({})", field.type_name).cyan());
                println!(
                    "  type code {}, nth {}, ordinal {}",
                    field.type_code,
                    field.nth,
                    format!("{:#010x}", field.ordinal).yellow()
                );
                if field.is_serialized {
                    println!("  header: {}", header.green());
                } else {
                    println!("  header: {}", "not serialized".dimmed());
                }
                println!(
                    "  length-prefixed: {}, signing field: {}",
                    yes_no(field.is_vl_encoded),
                    yes_no(field.is_signing_field)
                );
                Ok(())
            }
        }
    }
}

fn apply_case(hex: String, uppercase: bool) -> String {
    if uppercase {
        hex
    } else {
        hex.to_lowercase()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn run(args: &[&str]) -> anyhow::Result<()> {
        run_command(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn case_follows_config() {
        assert_eq!(apply_case("ABCD".into(), true), "ABCD");
        assert_eq!(apply_case("ABCD".into(), false), "abcd");
    }

    #[test]
    fn inline_input_is_trimmed() {
        let args = InputArgs { value: Some("  12 \n".into()), file: None };
        assert_eq!(read_input(&args).unwrap(), "12");
    }

    #[test]
    fn file_input() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[{{\"Flags\": 0}}]").unwrap();
        let args = InputArgs { value: None, file: Some(file.path().to_path_buf()) };
        assert_eq!(read_array(&args).unwrap().len(), 1);
    }

    #[test]
    fn non_array_rejected() {
        let args = InputArgs { value: Some("{}".into()), file: None };
        assert!(read_array(&args).is_err());
    }

    #[test]
    fn commands_run() {
        run(&["xbc", "encode", r#"{"TransactionType": "Payment", "Flags": 0}"#]).unwrap();
        run(&["xbc", "decode", "1200002200000000"]).unwrap();
        run(&["xbc", "--format", "json", "encode-quality", "195796912.5171664"]).unwrap();
        run(&["xbc", "field", "Account"]).unwrap();
        run(&["xbc", "--format", "json", "field", "hash"]).unwrap();
    }

    #[test]
    fn codec_errors_surface() {
        assert!(run(&["xbc", "decode", "zz"]).is_err());
        assert!(run(&["xbc", "field", "NoSuchField"]).is_err());
        assert!(run(&["xbc", "encode", "not json"]).is_err());
    }

    #[test]
    fn missing_definitions_file() {
        assert!(run(&["xbc", "--definitions", "/nonexistent/defs.json", "field", "Fee"]).is_err());
    }
}
