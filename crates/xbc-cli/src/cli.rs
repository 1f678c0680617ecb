use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "xbc",
    about = "XAH binary codec: encode, decode, sign and hash ledger objects",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Alternate definitions.json for another network
    #[arg(long, global = true)]
    pub definitions: Option<PathBuf>,

    /// Print hex in lowercase
    #[arg(long, global = true)]
    pub lowercase: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a hex blob to JSON
    Decode(InputArgs),
    /// Encode a JSON object to hex
    Encode(InputArgs),
    /// Encode a transaction for single signing
    EncodeForSigning(InputArgs),
    /// Encode a payment channel claim for signing
    EncodeForSigningClaim(InputArgs),
    /// Encode a transaction for one of several signers
    EncodeForMultisigning(MultisignArgs),
    /// Encode an offer quality
    EncodeQuality(ValueArgs),
    /// Decode the quality in a book directory index
    DecodeQuality(ValueArgs),
    /// Decode a serialized ledger header
    DecodeLedgerData(InputArgs),
    /// Hash a signed transaction blob
    TxId(InputArgs),
    /// Hash a ledger header given as JSON
    LedgerHash(InputArgs),
    /// Root hash of a JSON array of transactions with metadata
    TxTreeHash(InputArgs),
    /// Root hash of a JSON array of ledger entries
    StateHash(InputArgs),
    /// Look up a field in the registry
    Field(FieldArgs),
}

/// Input given inline, read from a file, or read from stdin.
#[derive(Args)]
pub struct InputArgs {
    pub value: Option<String>,
    #[arg(short, long, conflicts_with = "value")]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct MultisignArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Classic or X-address of the signer
    #[arg(long)]
    pub signer: String,
}

#[derive(Args)]
pub struct ValueArgs {
    pub value: String,
}

#[derive(Args)]
pub struct FieldArgs {
    pub name: String,
}
