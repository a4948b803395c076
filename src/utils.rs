use crate::Error;

/// Decode host supplied text into bytes. Accepts bare base64 or a base64 `data:` URI
/// such as the `toDataURL` output of a signature pad.
pub fn decode_payload(text: &str) -> Result<Vec<u8>, Error> {
    let text = text.trim();
    let data = match text.strip_prefix("data:") {
        Some(uri) => {
            let (header, data) = uri
                .split_once(',')
                .ok_or_else(|| Error::InvalidPayload("data URI without ','".to_owned()))?;
            if !header.ends_with(";base64") {
                return Err(Error::InvalidPayload(format!(
                    "data URI `{}` is not base64 encoded",
                    header
                )));
            }
            data
        }
        None => text,
    };
    if data.is_empty() {
        return Err(Error::InvalidPayload("empty payload".to_owned()));
    }
    base64::decode(data).map_err(|err| Error::InvalidPayload(err.to_string()))
}

/// Pdf date string (`D:YYYYMMDDHHmmSSZ`) for the given instant.
pub fn pdf_date(time: chrono::DateTime<chrono::Utc>) -> String {
    time.format("D:%Y%m%d%H%M%SZ").to_string()
}
