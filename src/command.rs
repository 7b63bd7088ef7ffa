//! Command-line surface of the `sha256mac` binary.
//!
//! Parsing lives here rather than in the binary so option validation and output can be
//! tested without a process.

use std::io::{self, Read};

use clap::{ArgGroup, Parser};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::extension::forge;
use crate::mac::{compute_mac, verify_mac};
use crate::sha256::sha256_digest;

/// Raw command-line options. The message is always read from stdin.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "sha256mac",
    about = "SHA-256, secret-prefix MAC and length-extension forgery",
    group(
        ArgGroup::new("mode")
            .required(true)
            .args(["chash", "sign", "verify", "extend"])
    )
)]
pub struct Options {
    /// Print SHA-256 of stdin
    #[arg(short = 'c', long = "chash")]
    pub chash: bool,

    /// Print SHA-256(key ‖ stdin)
    #[arg(short = 's', long = "message")]
    pub sign: bool,

    /// Check that MAC matches stdin; exit status 1 on mismatch
    #[arg(short = 'v', long = "verify")]
    pub verify: bool,

    /// Forge a MAC for stdin extended with the appended message
    #[arg(short = 'e', long = "extension_attack")]
    pub extend: bool,

    /// Secret key
    #[arg(short = 'k', long = "key")]
    pub key: Option<String>,

    /// MAC to verify or to attack (64 hex characters)
    #[arg(short = 'm', long = "mac")]
    pub mac: Option<String>,

    /// Message to append in the attack
    #[arg(short = 'a', long = "append")]
    pub append: Option<String>,

    /// Length of the secret key in bytes
    #[arg(short = 'n', long = "length")]
    pub length: Option<usize>,
}

/// A validated request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Digest,
    Sign { key: Vec<u8> },
    Verify { key: Vec<u8>, mac: String },
    Extend { key_len: usize, mac: String, suffix: Vec<u8> },
}

/// What to print and how to exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub lines: Vec<String>,
    pub success: bool,
}

impl Report {
    fn printed(lines: Vec<String>) -> Self {
        Self { lines, success: true }
    }
}

fn required(value: Option<String>, flag: char, what: &'static str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingOption { flag, what })
}

impl TryFrom<Options> for Command {
    type Error = Error;

    fn try_from(options: Options) -> Result<Self> {
        if options.chash {
            Ok(Command::Digest)
        } else if options.sign {
            let key = required(options.key, 'k', "key")?;
            Ok(Command::Sign { key: key.into_bytes() })
        } else if options.verify {
            let key = required(options.key, 'k', "key to verify")?;
            let mac = required(options.mac, 'm', "MAC to verify")?;
            Ok(Command::Verify { key: key.into_bytes(), mac })
        } else if options.extend {
            let mac = required(options.mac, 'm', "MAC to attack")?;
            let suffix = required(options.append, 'a', "message to append")?;
            let key_len = match options.length {
                Some(n) if n > 0 => n,
                _ => {
                    return Err(Error::MissingOption {
                        flag: 'n',
                        what: "length of the password",
                    })
                }
            };
            Ok(Command::Extend {
                key_len,
                mac,
                suffix: suffix.into_bytes(),
            })
        } else {
            Err(Error::InvalidInput(
                "one of -c, -s, -v or -e is required".to_string(),
            ))
        }
    }
}

impl Command {
    /// Short mode name for logging. Never includes the key.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Digest => "digest",
            Command::Sign { .. } => "sign",
            Command::Verify { .. } => "verify",
            Command::Extend { .. } => "extend",
        }
    }

    /// Executes against the message read from stdin.
    pub fn run(&self, message: &[u8]) -> Result<Report> {
        debug!("running {} on {} bytes", self.name(), message.len());
        match self {
            Command::Digest => Ok(Report::printed(vec![sha256_digest(message).to_hex()])),
            Command::Sign { key } => Ok(Report::printed(vec![compute_mac(key, message).to_hex()])),
            Command::Verify { key, mac } => {
                let success = verify_mac(key, message, mac);
                if !success {
                    warn!("MAC mismatch");
                }
                Ok(Report {
                    lines: Vec::new(),
                    success,
                })
            }
            Command::Extend { key_len, mac, suffix } => {
                let forgery = forge(mac, *key_len, message, suffix)?;
                Ok(Report::printed(vec![
                    forgery.digest().to_hex(),
                    forgery.escaped(),
                ]))
            }
        }
    }
}

/// Reads the whole message, dropping one trailing newline.
pub fn read_message<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut message = Vec::new();
    reader.read_to_end(&mut message)?;
    if message.last() == Some(&b'\n') {
        message.pop();
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(args: &[&str]) -> Result<Command> {
        let options = Options::try_parse_from(std::iter::once("sha256mac").chain(args.iter().copied()))
            .expect("arguments parse");
        Command::try_from(options)
    }

    #[test]
    fn test_digest_command() {
        let report = command(&["-c"]).unwrap().run(b"abc").unwrap();
        assert!(report.success);
        assert_eq!(
            report.lines,
            vec!["ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"]
        );
    }

    #[test]
    fn test_sign_requires_key() {
        assert_eq!(
            command(&["-s"]),
            Err(Error::MissingOption { flag: 'k', what: "key" })
        );
        assert_eq!(
            command(&["-s", "-k", ""]),
            Err(Error::MissingOption { flag: 'k', what: "key" })
        );
    }

    #[test]
    fn test_sign_and_verify() {
        let signed = command(&["-s", "-k", "heslo"]).unwrap().run(b"zprava").unwrap();
        let mac = signed.lines[0].clone();
        assert_eq!(mac, compute_mac(b"heslo", b"zprava").to_hex());

        let ok = command(&["-v", "-k", "heslo", "-m", &mac]).unwrap().run(b"zprava").unwrap();
        assert!(ok.success);
        assert!(ok.lines.is_empty());

        let bad = command(&["-v", "-k", "heslo", "-m", &mac]).unwrap().run(b"zprava!").unwrap();
        assert!(!bad.success);
    }

    #[test]
    fn test_verify_requires_key_then_mac() {
        assert_eq!(
            command(&["-v", "-m", "00"]),
            Err(Error::MissingOption { flag: 'k', what: "key to verify" })
        );
        assert_eq!(
            command(&["-v", "-k", "key"]),
            Err(Error::MissingOption { flag: 'm', what: "MAC to verify" })
        );
    }

    #[test]
    fn test_extend_validation_order() {
        assert!(matches!(
            command(&["-e", "-a", "x", "-n", "3"]),
            Err(Error::MissingOption { flag: 'm', .. })
        ));
        assert!(matches!(
            command(&["-e", "-m", "ab", "-n", "3"]),
            Err(Error::MissingOption { flag: 'a', .. })
        ));
        assert!(matches!(
            command(&["-e", "-m", "ab", "-a", "x"]),
            Err(Error::MissingOption { flag: 'n', .. })
        ));
        assert!(matches!(
            command(&["-e", "-m", "ab", "-a", "x", "-n", "0"]),
            Err(Error::MissingOption { flag: 'n', .. })
        ));
    }

    #[test]
    fn test_extend_long_options() {
        let mac = compute_mac(b"secret", b"msg").to_hex();
        let report = command(&[
            "--extension_attack",
            "--length",
            "6",
            "--mac",
            &mac,
            "--append",
            "!ext",
        ])
        .unwrap()
        .run(b"msg")
        .unwrap();

        assert!(report.success);
        assert_eq!(report.lines.len(), 2);
        assert!(report.lines[1].starts_with("msg\\x80"));
        assert!(report.lines[1].ends_with("\\x48!ext"));

        let forgery = forge(&mac, 6, b"msg", b"!ext").unwrap();
        assert_eq!(report.lines[0], forgery.digest().to_hex());
        assert_eq!(compute_mac(b"secret", forgery.message()).to_hex(), report.lines[0]);
    }

    #[test]
    fn test_extend_with_malformed_mac_fails() {
        let cmd = command(&["-e", "-m", "not-a-mac", "-a", "x", "-n", "4"]).unwrap();
        assert!(matches!(
            cmd.run(b"msg"),
            Err(Error::InvalidDigestLength { length: 9, .. })
        ));
    }

    #[test]
    fn test_mode_is_required_and_exclusive() {
        assert!(Options::try_parse_from(["sha256mac"]).is_err());
        assert!(Options::try_parse_from(["sha256mac", "-k", "key"]).is_err());
        assert!(Options::try_parse_from(["sha256mac", "-c", "-s"]).is_err());
    }

    #[test]
    fn test_read_message_strips_one_newline() {
        assert_eq!(read_message(&b"hello\n"[..]).unwrap(), b"hello");
        assert_eq!(read_message(&b"hello\n\n"[..]).unwrap(), b"hello\n");
        assert_eq!(read_message(&b"a\nb"[..]).unwrap(), b"a\nb");
        assert_eq!(read_message(&b""[..]).unwrap(), b"");
    }
}
