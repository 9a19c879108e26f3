#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;

use serde_json::{json, Value};
use validator_domain_core::TableSource;

pub const RABBITKICK_MANIFEST: &str = "240000007B7121EDA54C85F91219FD259134B6B126AD64AE7204B81DD4052510657E1A5697246AD27321032F7ACF6D67C42C9C898F576F92FE4638EB6C88D0DC7F6710AF00ED6BF50D97D676473045022100BE0B2E6071AED53C19A76BDC6EDE1A351C35343AA7CF917587F93C9D85C5A7B702207135F72654DC3AD70FE8A4DEB128965268A312DFB3E9A7C68BA8E9A8931F4285770F7261626269746B69636B2E636C7562701240C4FF2A6D277D24DEFB1C1EDF67285171EA02DC035FEF6216DEE41019CE41611AD4430AF59938DC505E538CCF669D521AC2A456C3805FE3CA85BB10B2A691B50B";

pub const MAYUR_MANIFEST: &str = "24000000027121ED24ED1C96F59215417497AC51CD9850549A51586E00856F0037D82EAA01AB4C7B732102AB53AFAADA932FB71888F8E37F6CB48B08612E6CB77B3C5A3227F6ABFD0641A076473045022100A887F4C261786803AD033839FB52272E1123A57DFF48C07C06616D2028A4CC0502203F3325B1635864EBBFE44991910D66836F66FC00E14E965AB0F5352AD97816FF771770617969642E6D617975726268616E646172792E636F6D70124070AF72795E290EC997D0DDCE5180F260FD013BE75A3C57924829599D53F14CB071F090E76428BA77A43C3530CBA8BA72CF1AC59EEF9A352E9EA4B8334703EB0E";

/// Base64 form, as published in validator lists.
pub const NO_DOMAIN_MANIFEST_B64: &str = "JAAAAAFxIe2heHHnKwxXCsQ0XGDPAq+7t0CmMbetDh5XMhZXTZrqAnMhAojyuzgtreQkxQj8prHxOsbDcF5fu4XXb0KxEL/Pq5HhdkcwRQIhANfPDLZP47aCWwt5kBnp75BuuCgp9c4BfJPd66SFCw61AiAJvegBvvPIrec+XOSzKRfi5uuXWxtl9Eyr2aPBYXvbRHASQMULYEo7beRfoUCnjk1sTYyY91tLIGLgnnaWXhUm80+zs5IGegk8qijKAtBOMuBC71lAB4KhJc+dB2rpMOFc5gw=";

pub const RABBITKICK_MASTER: &str = "nHUcNC5ni7XjVYfCMe38Rm3KQaq27jw7wJpcUYdo4miWwpNePRTw";
pub const RABBITKICK_SIGNING: &str = "n9Li9iXepgXECvTFq2hGoxqSttJy9rrC1NbZ75NXLZyKFekV5ZU1";
pub const RABBITKICK_SIGNATURE: &str = "3045022100BE0B2E6071AED53C19A76BDC6EDE1A351C35343AA7CF917587F93C9D85C5A7B702207135F72654DC3AD70FE8A4DEB128965268A312DFB3E9A7C68BA8E9A8931F4285";
pub const RABBITKICK_MASTER_SIGNATURE: &str = "C4FF2A6D277D24DEFB1C1EDF67285171EA02DC035FEF6216DEE41019CE41611AD4430AF59938DC505E538CCF669D521AC2A456C3805FE3CA85BB10B2A691B50B";
pub const RABBITKICK_ATTESTATION: &str = "27899F1CEDA9DD21FE4603B53795D83C23EBBBB06017C02AC740391D4BDDAF125B343A0B10B35FC30C07E22ACA982C624CF25E388818A1069B857FE49A0FFB0E";

pub const MAYUR_MASTER: &str = "nHBd6ZRXfG353vtK1kwCahqbMk6BAqUz57rVy77Do5YTBG8LHkye";
pub const NO_DOMAIN_MASTER: &str = "nHU2Y1mLGDvTbc2dpvpkQ16qdeTKv2aJwGJHFySSB9U3jkTmj4CA";

pub fn rabbitkick_decoded() -> Value {
    json!({
        "Sequence": 123,
        "Domain": "rabbitkick.club",
        "PublicKey": RABBITKICK_MASTER,
        "SigningPubKey": RABBITKICK_SIGNING,
        "Signature": RABBITKICK_SIGNATURE,
        "MasterSignature": RABBITKICK_MASTER_SIGNATURE
    })
}

pub fn rabbitkick_rpc() -> Value {
    json!({
        "seq": 123,
        "domain": "rabbitkick.club",
        "master_key": RABBITKICK_MASTER,
        "signing_key": RABBITKICK_SIGNING,
        "signature": RABBITKICK_SIGNATURE,
        "master_signature": RABBITKICK_MASTER_SIGNATURE
    })
}

pub fn rabbitkick_normalized() -> Value {
    json!({
        "seq": 123,
        "domain": "rabbitkick.club",
        "master_key": RABBITKICK_MASTER,
        "ephemeral_key": RABBITKICK_SIGNING,
        "signature": RABBITKICK_SIGNATURE,
        "master_signature": RABBITKICK_MASTER_SIGNATURE
    })
}

pub fn rabbitkick_table() -> String {
    format!(
        r#"
[METADATA]
modified = 2020-02-27T05:17:00.000Z

[[VALIDATORS]]
public_key = "{}"
attestation = "{}"
network = "main"
owner_country = "US"
server_country = "US"
unl = "https://vl.ripple.com"

[[ACCOUNTS]]
address = "rabbitZWLG8PptsrPjuvKX4uAGjS5B64PP"
network = "main"

[[PRINCIPALS]]
name = "rabbit"
email = "postmaster@rabbitkick.club"
twitter = "@RabbitKickClub"
"xrpchat.com" = "Rabbit_Kick_Club"

[[SERVERS]]
peer = "hub.rabbitkick.club"
network = "main"
port = 51235
"#,
        RABBITKICK_MASTER, RABBITKICK_ATTESTATION
    )
}

/// Serves one fixed table and counts how often it was asked for.
pub struct StaticTable {
    toml: String,
    pub fetches: Cell<usize>,
    pub last_domain: std::cell::RefCell<Option<String>>,
}

impl StaticTable {
    pub fn new(toml: impl Into<String>) -> Self {
        Self {
            toml: toml.into(),
            fetches: Cell::new(0),
            last_domain: std::cell::RefCell::new(None),
        }
    }
}

impl TableSource for StaticTable {
    type Error = Infallible;

    fn fetch(&self, domain: &str) -> Result<toml::Table, Self::Error> {
        self.fetches.set(self.fetches.get() + 1);
        *self.last_domain.borrow_mut() = Some(domain.to_string());
        Ok(toml::from_str(&self.toml).expect("fixture TOML parses"))
    }
}

pub fn no_domain_hex() -> String {
    use base64::Engine;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(NO_DOMAIN_MANIFEST_B64)
        .unwrap();
    hex::encode_upper(bytes)
}
