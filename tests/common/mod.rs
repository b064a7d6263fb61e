#![allow(dead_code)]

use std::path::Path;

use tempfile::TempDir;

pub const SAME_STATE: &str = r#"{
    "sellerDetails": {
        "name": "Varasiddhi Silk Exports", "address": "75, 3rd Cross, Lalbagh Road",
        "city": "Bengaluru", "state": "Karnataka", "pincode": "560027",
        "panNo": "AACFV3325K", "gstNo": "29AACFV3325K1ZY"
    },
    "billingDetails": {
        "name": "Madhu B", "address": "Eurofins IT Solutions India Pvt Ltd",
        "city": "Bengaluru", "state": "Karnataka", "pincode": "560048", "stateCode": "29"
    },
    "shippingDetails": {
        "name": "Madhu B", "address": "Eurofins IT Solutions India Pvt Ltd",
        "city": "Bengaluru", "state": "Karnataka", "pincode": "560048", "stateCode": "29"
    },
    "orderDetails": {"orderNo": "403-3225714-7676307", "orderDate": "28.10.2019"},
    "invoiceDetails": {
        "invoiceNo": "IN-761", "invoiceDetails": "KA-310565025-1920", "invoiceDate": "28.10.2019"
    },
    "items": [
        {"description": "Varasiddhi Silks Men's Formal Shirt", "unitPrice": 100, "quantity": 2}
    ]
}"#;

/// Same invoice shipped to another state.
pub fn inter_state() -> String {
    SAME_STATE.replacen(
        r#""city": "Bengaluru", "state": "Karnataka", "pincode": "560048", "stateCode": "29"
    },
    "orderDetails""#,
        r#""city": "Mumbai", "state": "Maharashtra", "pincode": "400001", "stateCode": "27"
    },
    "orderDetails""#,
        1,
    )
}

fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([20, 40, 160, 200]));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

/// Temporary static directory holding both images.
pub fn static_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("logo.png"), 8, 4);
    write_png(&dir.path().join("signature.png"), 10, 3);
    dir
}

/// Temporary static directory holding only the signature.
pub fn static_dir_without_logo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("signature.png"), 10, 3);
    dir
}
