use data_types::addresses::{EffectiveAddress, ImageOffset, Section};
use data_types::patch::{padded_replace, zeroes, Patch, PatchSet};
use patcher::branch::insert_call;
use patcher::catalog::Catalog;
use patcher::{apply_sets, verify_sets, PatcherError};
use ppc_compiler::{literal, Instruction, Instructions, Register};
use std::io::Write;

const URL: &str = "https://ecs.shop.wii.com/ecs/services/ECommerceSOAP";

/// Code at the start of the section, a URL at 0x80
fn image(section: &Section) -> Vec<u8> {
    let prologue = Instructions::from([
        Instruction::STWU(Register::SP, 0xffe0, Register::SP),
        literal::MFLR_R0,
    ]);
    let mut image = vec![0u8; 0x100];
    let start = usize::from(section.offset);
    image[start..start + prologue.byte_len()].copy_from_slice(&prologue.to_bytes());
    image[0x80..0x80 + URL.len()].copy_from_slice(URL.as_bytes());
    image
}

fn section() -> Section {
    Section::new(
        ImageOffset::from_const(0x20),
        EffectiveAddress::from_const(0x8000_3000),
        0x40,
    )
}

fn patch_sets(section: &Section) -> Vec<PatchSet> {
    let hook = EffectiveAddress::from_const(0x8000_3038);
    let original = literal::MFLR_R0;
    let call = insert_call(section, section.offset + 4, original, hook)
        .expect("hook is in range")
        .named("Call hook");

    let stub = Instructions::from([Instruction::LI(Register::R3, 1), Instruction::BLR]);
    vec![
        PatchSet::new("Hook").with(call).with(
            Patch::at(0x58usize, zeroes(stub.byte_len()), stub.to_bytes()).named("Hook body"),
        ),
        PatchSet::new("Shop domain").with(Patch::everywhere(
            URL.as_bytes(),
            padded_replace(URL, "shop.wii.com", "example.org").expect("shorter domain"),
        )),
    ]
}

#[test]
fn test_catalog_file_roundtrip() {
    let catalog = Catalog {
        sets: patch_sets(&section()),
    };
    let file = tempfile::NamedTempFile::new().unwrap();
    catalog.save(file.path()).unwrap();
    assert_eq!(Catalog::from_file(file.path()).unwrap(), catalog);
}

#[test]
fn test_catalog_from_handwritten_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{
                "name": "Return early",
                "patches": [
                    {{ "name": "blr", "offset": 32, "before": "9421ffe0", "after": "4e800020" }}
                ]
            }}
        ]"#
    )
    .unwrap();
    file.flush().unwrap();

    let catalog = Catalog::from_file(file.path()).unwrap();
    let sets = catalog.select(&["Return early"]).unwrap();
    let original = image(&section());
    let (patched, _) = apply_sets(&original, &sets).unwrap();
    assert_eq!(&patched[0x20..0x24], &Instruction::BLR.bytes());
    assert_eq!(patched.len(), original.len());
}

#[test]
fn test_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{ "name": "x", "patches": [{{ "before": "abc", "after": "00" }}] }}]"#
    )
    .unwrap();
    file.flush().unwrap();
    assert!(Catalog::from_file(file.path()).is_err());
}

#[test]
fn test_apply_and_verify() {
    let section = section();
    let catalog = Catalog {
        sets: patch_sets(&section),
    };
    let sets = catalog.select::<&str>(&[]).unwrap();
    let original = image(&section);

    assert!(verify_sets(&original, &sets).is_err());
    let (patched, reports) = apply_sets(&original, &sets).unwrap();
    verify_sets(&patched, &sets).unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].patches[0].label, "Call hook");
    // bl from 0x80003004 to 0x80003038
    assert_eq!(&patched[0x24..0x28], &[0x48, 0x00, 0x00, 0x35]);
    assert_eq!(&patched[0x58..0x60], &[0x38, 0x60, 0x00, 0x01, 0x4e, 0x80, 0x00, 0x20]);
    assert!(patched[0x80..].starts_with(b"https://ecs.example.org/ecs/"));

    // already applied
    assert!(matches!(
        apply_sets(&patched, &sets),
        Err(PatcherError::Patch(err)) if err.source.is_mismatch()
    ));
}
