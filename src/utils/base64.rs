use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::{DecodePaddingMode, GeneralPurposeConfig};
use base64::{DecodeError, Engine as _};

const PADDED: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
    .with_decode_allow_trailing_bits(true);

const UNPADDED: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::RequireNone)
    .with_decode_allow_trailing_bits(true);

const STANDARD_PADDED: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PADDED);
const URL_SAFE_PADDED: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PADDED);
const STANDARD_RAW: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, UNPADDED);
const URL_SAFE_RAW: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, UNPADDED);

/// Pads a Base64 string with `=` until its length is a multiple of four.
pub fn pad_base64(input: &str) -> String {
    match input.len() % 4 {
        0 => input.to_string(),
        rem => format!("{}{}", input, "=".repeat(4 - rem)),
    }
}

/// Decodes Base64 produced by any of the common share-link generators.
///
/// The trimmed input is tried as standard padded, URL-safe padded, standard
/// unpadded and URL-safe unpadded, in that order. The first success wins; the
/// error of the last attempt is returned when all of them fail.
pub fn decode_base64_compat(input: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = input.trim();
    let padded = pad_base64(trimmed);

    STANDARD_PADDED
        .decode(&padded)
        .or_else(|_| URL_SAFE_PADDED.decode(&padded))
        .or_else(|_| STANDARD_RAW.decode(trimmed))
        .or_else(|_| URL_SAFE_RAW.decode(trimmed))
}
