//! Command-line surface and command execution.

use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sealer::{DecryptOptions, EncryptOptions, Encrypter, Key};
use serde_json::Value;

/// Encrypt, decrypt, sign and verify envelopes with the keys in `APP_KEY`.
#[derive(Debug, Parser)]
#[command(name = "sealctl", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt a JSON value (or raw text with `--raw`).
    Encrypt {
        /// Compress the plaintext before encrypting.
        #[arg(long)]
        compress: bool,
        /// Seconds until the payload expires.
        #[arg(long)]
        ttl: Option<u64>,
        /// Context bound as associated data.
        #[arg(long)]
        context: Option<String>,
        /// Treat the input as raw text instead of JSON.
        #[arg(long)]
        raw: bool,
        /// Value to encrypt; read from stdin when omitted.
        value: Option<String>,
    },
    /// Decrypt a payload and print the value.
    Decrypt {
        /// Context the payload was bound to.
        #[arg(long)]
        context: Option<String>,
        /// Print the plaintext as raw text instead of JSON.
        #[arg(long)]
        raw: bool,
        /// Payload to decrypt; read from stdin when omitted.
        payload: Option<String>,
    },
    /// Sign a JSON value.
    Sign {
        /// Value to sign; read from stdin when omitted.
        value: Option<String>,
    },
    /// Verify a signed payload and print the value.
    Verify {
        /// Payload to verify; read from stdin when omitted.
        payload: Option<String>,
    },
    /// Print a fresh random key in `base64:` form.
    GenerateKey,
}

impl Command {
    /// Whether the command needs a configured key ring.
    pub fn needs_keys(&self) -> bool {
        !matches!(self, Command::GenerateKey)
    }
}

/// Execute `command`, returning the text to print on stdout.
pub fn run(command: Command, encrypter: Option<&Encrypter>) -> Result<String> {
    let enc = match (&command, encrypter) {
        (Command::GenerateKey, _) => return Ok(generate_key()),
        (_, Some(enc)) => enc,
        (_, None) => anyhow::bail!("APP_KEY must be configured for this command"),
    };

    match command {
        Command::Encrypt {
            compress,
            ttl,
            context,
            raw,
            value,
        } => {
            let options = EncryptOptions {
                compress,
                ttl: ttl.map(Duration::from_secs),
                context,
            };
            let input = input_or_stdin(value)?;
            if raw {
                Ok(enc.encrypt_string(&input, &options)?)
            } else {
                Ok(enc.encrypt(&parse_json(&input)?, &options)?)
            }
        }
        Command::Decrypt {
            context,
            raw,
            payload,
        } => {
            let options = DecryptOptions { context };
            let payload = input_or_stdin(payload)?;
            if raw {
                Ok(enc.decrypt_string(&payload, &options)?)
            } else {
                let value: Value = enc.decrypt(&payload, &options)?;
                Ok(value.to_string())
            }
        }
        Command::Sign { value } => Ok(enc.sign(&parse_json(&input_or_stdin(value)?)?)?),
        Command::Verify { payload } => {
            let value: Value = enc.verify(&input_or_stdin(payload)?)?;
            Ok(value.to_string())
        }
        Command::GenerateKey => Ok(generate_key()),
    }
}

fn generate_key() -> String {
    Key::generate().to_labeled()
}

fn parse_json(input: &str) -> Result<Value> {
    serde_json::from_str(input).context("input is not valid JSON (use --raw for plain text)")
}

fn input_or_stdin(arg: Option<String>) -> Result<String> {
    if let Some(arg) = arg {
        return Ok(arg);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use sealer::KeyRing;

    fn encrypter() -> Encrypter {
        Encrypter::new(KeyRing::single(Key::generate()))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_encrypt_flags() {
        let cli = Cli::parse_from([
            "sealctl", "encrypt", "--compress", "--ttl", "30", "--context", "u1", "\"v\"",
        ]);
        match cli.command {
            Command::Encrypt {
                compress,
                ttl,
                context,
                raw,
                value,
            } => {
                assert!(compress);
                assert_eq!(ttl, Some(30));
                assert_eq!(context.as_deref(), Some("u1"));
                assert!(!raw);
                assert_eq!(value.as_deref(), Some("\"v\""));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn encrypt_then_decrypt_json() {
        let enc = encrypter();
        let payload = run(
            Command::Encrypt {
                compress: false,
                ttl: None,
                context: Some("ctx".into()),
                raw: false,
                value: Some(r#"{"id":1,"name":"Arika"}"#.into()),
            },
            Some(&enc),
        )
        .unwrap();
        let out = run(
            Command::Decrypt {
                context: Some("ctx".into()),
                raw: false,
                payload: Some(payload),
            },
            Some(&enc),
        )
        .unwrap();
        assert_eq!(out, r#"{"id":1,"name":"Arika"}"#);
    }

    #[test]
    fn raw_text_round_trip() {
        let enc = encrypter();
        let payload = run(
            Command::Encrypt {
                compress: true,
                ttl: Some(60),
                context: None,
                raw: true,
                value: Some("Hello World".into()),
            },
            Some(&enc),
        )
        .unwrap();
        let out = run(
            Command::Decrypt {
                context: None,
                raw: true,
                payload: Some(payload),
            },
            Some(&enc),
        )
        .unwrap();
        assert_eq!(out, "Hello World");
    }

    #[test]
    fn sign_then_verify() {
        let enc = encrypter();
        let payload = run(Command::Sign { value: Some("[1,2,3]".into()) }, Some(&enc)).unwrap();
        let out = run(Command::Verify { payload: Some(payload) }, Some(&enc)).unwrap();
        assert_eq!(out, "[1,2,3]");
    }

    #[test]
    fn invalid_json_input_is_an_error() {
        let enc = encrypter();
        let res = run(Command::Sign { value: Some("not json".into()) }, Some(&enc));
        assert!(res.is_err());
    }

    #[test]
    fn keyed_command_without_ring_is_an_error() {
        let res = run(Command::Verify { payload: Some("x".into()) }, None);
        assert!(res.is_err());
    }

    #[test]
    fn generate_key_needs_no_ring() {
        assert!(!Command::GenerateKey.needs_keys());
        let key = run(Command::GenerateKey, None).unwrap();
        assert!(Key::parse(&key).is_ok());
    }
}
