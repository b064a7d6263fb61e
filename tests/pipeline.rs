mod common;

use gst_invoice::{
    DrawList, DrawOp, ErrorKind, Invoice, LayoutPreset, RenderOptions, generate_draw_list,
    generate_pdf, render_invoice,
};

fn same_state() -> Invoice {
    Invoice::from_json(common::SAME_STATE.as_bytes()).unwrap()
}

#[test]
fn intra_state_invoice_is_split_into_cgst_and_sgst() {
    let assets = common::static_dir();
    let list = generate_draw_list(&same_state(), &RenderOptions::new(assets.path())).unwrap();
    let texts = list.texts();
    assert!(texts.contains(&"CGST + SGST"));
    assert!(texts.contains(&"9%"));
    assert!(texts.contains(&"Total Net Amount: 200.00"));
    assert!(texts.contains(&"Total Tax Amount: 36.00"));
    assert!(texts.contains(&"Total Amount: 236.00"));
    assert!(texts.contains(&"Amount in Words: two hundred thirty-six only"));
}

#[test]
fn inter_state_invoice_uses_igst() {
    let assets = common::static_dir();
    let invoice = Invoice::from_json(common::inter_state().as_bytes()).unwrap();
    assert_eq!(invoice.shipping().state(), "Maharashtra");
    let list = generate_draw_list(&invoice, &RenderOptions::new(assets.path())).unwrap();
    let texts = list.texts();
    assert!(texts.contains(&"IGST"));
    assert!(texts.contains(&"18%"));
    assert!(!texts.contains(&"CGST + SGST"));
    assert!(texts.contains(&"Total Amount: 236.00"));
}

#[test]
fn missing_logo_draws_nothing() {
    let assets = common::static_dir_without_logo();
    let mut list = DrawList::new();
    let err = render_invoice(&same_state(), &RenderOptions::new(assets.path()), &mut list)
        .unwrap_err();
    match err.kind() {
        ErrorKind::AssetMissing(path) => assert!(path.ends_with("logo.png")),
        other => panic!("expected AssetMissing, got {other:?}"),
    }
    assert!(list.is_empty());

    let err = generate_pdf(&same_state(), &RenderOptions::new(assets.path())).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::AssetMissing(_)));
}

#[test]
fn rendering_is_deterministic() {
    let assets = common::static_dir();
    let options = RenderOptions::new(assets.path());
    let first = generate_draw_list(&same_state(), &options).unwrap();
    let second = generate_draw_list(&same_state(), &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn images_are_placed_once_each() {
    let assets = common::static_dir();
    let list = generate_draw_list(&same_state(), &RenderOptions::new(assets.path())).unwrap();
    let images: Vec<&str> = list
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Image { name, .. } => Some(name.as_str()),
            DrawOp::Text { .. } => None,
        })
        .collect();
    assert_eq!(images, ["logo.png", "signature.png"]);
}

#[test]
fn generates_pdf_for_both_layouts() {
    let assets = common::static_dir();
    for preset in [LayoutPreset::Compact, LayoutPreset::Wide] {
        let options = RenderOptions::new(assets.path()).with_layout(preset.config());
        let pdf = generate_pdf(&same_state(), &options).unwrap();
        assert!(pdf.starts_with(b"%PDF-"), "{preset:?} did not produce a pdf");
    }
}
