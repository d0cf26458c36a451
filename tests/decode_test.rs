use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use mail_body_extract::*;

/// Minimal quoted-printable encoder: escapes non-printable bytes and `=`,
/// wraps with soft line breaks.
fn encode_qp(text: &str) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    for byte in text.bytes() {
        let piece = if (byte.is_ascii_graphic() && byte != b'=') || byte == b' ' {
            (byte as char).to_string()
        } else {
            format!("={byte:02X}")
        };
        if line_len + piece.len() > 72 {
            out.push_str("=\r\n");
            line_len = 0;
        }
        line_len += piece.len();
        out.push_str(&piece);
    }
    out
}

// --- Charset normalization ---

#[test]
fn test_normalize_charset() {
    assert_eq!(normalize_charset("UTF-8"), "utf-8");
    assert_eq!(normalize_charset("\"utf8\""), "utf8");
    assert_eq!(normalize_charset("iso-8859-1;"), "iso-8859-1");
    assert_eq!(normalize_charset(" Windows_1252 "), "windows1252");
}

#[test]
fn test_decode_charset() {
    assert_eq!(decode_charset(b"caf\xe9", "ISO-8859-1").unwrap(), "café");
    assert_eq!(decode_charset("café".as_bytes(), "\"UTF-8\"").unwrap(), "café");
}

#[test]
fn test_decode_charset_errors() {
    assert!(matches!(
        decode_charset(b"abc", "x-klingon"),
        Err(DecodeError::UnknownCharset(_))
    ));
    assert!(matches!(
        decode_charset(b"\xff\xfe", "utf-8"),
        Err(DecodeError::Malformed { .. })
    ));
}

// --- Quoted-printable ---

#[test]
fn test_qp_bytes() {
    assert_eq!(qp_bytes("caf=C3=A9"), "café".as_bytes());
    assert_eq!(qp_bytes("lower=c3=a9"), b"lower\xc3\xa9");
}

#[test]
fn test_qp_soft_line_breaks() {
    assert_eq!(decode_qp("Hello=\r\nWorld", "utf-8"), "HelloWorld");
    assert_eq!(decode_qp("Hello=\nWorld", "utf-8"), "HelloWorld");
}

#[test]
fn test_qp_literal_equals() {
    assert_eq!(decode_qp("1+1=2", "utf-8"), "1+1=2");
    assert_eq!(decode_qp("a=zz b", "utf-8"), "a=zz b");
    assert_eq!(decode_qp("trailing=", "utf-8"), "trailing=");
}

#[test]
fn test_qp_declared_charset() {
    assert_eq!(decode_qp("Jos=E9", "iso-8859-1"), "José");
    assert_eq!(decode_qp("Jos=C3=A9", "UTF-8"), "José");
}

#[test]
fn test_qp_unknown_charset_falls_back_to_utf8() {
    assert_eq!(decode_qp("Jos=C3=A9", "x-unknown"), "José");
}

#[test]
fn test_qp_undecodable_returns_original() {
    assert_eq!(decode_qp("bad =FF=FE bytes", "utf-8"), "bad =FF=FE bytes");
}

#[test]
fn test_qp_round_trip() {
    let original = "Olá! Seu pedido nº 1234 = R$ 59,90 foi enviado. \
                    Qualquer dúvida, responda este e-mail. Obrigado por comprar conosco 🚚";
    let encoded = encode_qp(original);

    assert!(encoded.contains("=\r\n"));
    assert_eq!(decode_qp(&encoded, "utf-8"), original);
}

// --- Base64 ---

#[test]
fn test_b64_round_trip() {
    let original = "Confirmação de pagamento: recebemos R$ 120,00 ✔";
    let encoded = STANDARD.encode(original.as_bytes());

    assert_eq!(decode_b64(&encoded, "utf-8"), original);
}

#[test]
fn test_b64_ignores_whitespace() {
    assert_eq!(decode_b64("SGVs\r\nbG8g\r\n V29y bGQ=", "utf-8"), "Hello World");
}

#[test]
fn test_b64_declared_charset() {
    let encoded = STANDARD.encode(b"Jos\xe9");
    assert_eq!(decode_b64(&encoded, "latin1"), "José");
}

#[test]
fn test_b64_malformed_returns_original() {
    assert_eq!(decode_b64("not base64!!", "utf-8"), "not base64!!");
    assert!(matches!(base64_bytes("@@@@"), Err(DecodeError::Base64(_))));
}

#[test]
fn test_b64_missing_padding() {
    assert_eq!(decode_b64("SGVsbG8", "utf-8"), "Hello");
    assert_eq!(base64_bytes("YcOp").unwrap(), "aé".as_bytes());
}

#[test]
fn test_b64_binary_payload_returns_original() {
    let encoded = STANDARD.encode([0xff, 0xfe, 0x00, 0x81]);
    assert_eq!(decode_b64(&encoded, "utf-8"), encoded);
}

// --- TransferEncoding ---

#[test]
fn test_transfer_encoding_from_header() {
    assert_eq!(
        TransferEncoding::from_header("Quoted-Printable"),
        TransferEncoding::QuotedPrintable
    );
    assert_eq!(TransferEncoding::from_header(" BASE64 "), TransferEncoding::Base64);
    assert_eq!(TransferEncoding::from_header("7bit"), TransferEncoding::Identity);
    assert_eq!(TransferEncoding::from_header(""), TransferEncoding::Identity);
}

#[test]
fn test_transfer_encoding_decode() {
    assert_eq!(TransferEncoding::Identity.decode("a=C3=A9", "utf-8"), "a=C3=A9");
    assert_eq!(TransferEncoding::QuotedPrintable.decode("a=C3=A9", "utf-8"), "aé");
    assert_eq!(TransferEncoding::Base64.decode("YcOp", "utf-8"), "aé");
}
