use boxer::export::{
    encode_voc_xml_for_year, export_file_name, ExportFormat, ExportImage, UNKNOWN_LABEL_INDEX,
};
use boxer::geometry::Rect;
use boxer::stage::{BoxSeed, ImageSize, Stage, StageOptions};
use boxer::validation::IssueCode;
use proptest::prelude::*;

mod proptest_helpers;

fn vocabulary() -> Vec<String> {
    vec!["cat".to_string(), "dog".to_string()]
}

fn stage_with_image(width: u32, height: u32) -> Stage {
    let mut stage = Stage::new(StageOptions::default());
    let ticket = stage.request_background("dog.jpg");
    stage
        .apply_background(ticket, Ok(ImageSize::new(width, height)))
        .expect("apply background");
    stage
}

#[test]
fn yolo_line_for_single_dog() {
    let mut stage = stage_with_image(100, 50);
    stage.draw_box(&BoxSeed::new("dog", 10.0, 10.0, 20.0, 10.0));

    let txt = stage.export(ExportFormat::YoloTxt, &vocabulary(), Some("dog.jpg"));
    assert_eq!(txt, "1 0.2 0.3 0.2 0.2");
}

#[test]
fn empty_stage_exports() {
    let stage = stage_with_image(100, 50);
    assert_eq!(
        stage.export(ExportFormat::VocXml, &vocabulary(), Some("dog.jpg")),
        "<annotation></annotation>"
    );
    assert_eq!(
        stage.export(ExportFormat::YoloTxt, &vocabulary(), Some("dog.jpg")),
        ""
    );
}

#[test]
fn yolo_lines_follow_box_ids() {
    let mut stage = stage_with_image(200, 100);
    let a = stage.draw_box(&BoxSeed::new("cat", 0.0, 0.0, 100.0, 50.0));
    stage.draw_box(&BoxSeed::new("bird", 100.0, 50.0, 100.0, 50.0));
    stage.highlight(a);

    let txt = stage.export(ExportFormat::YoloTxt, &vocabulary(), None);
    let lines: Vec<&str> = txt.lines().collect();
    assert_eq!(lines, vec!["0 0.25 0.25 0.5 0.5", "-1 0.75 0.75 0.5 0.5"]);
    assert!(!txt.ends_with('\n'));
    assert_eq!(UNKNOWN_LABEL_INDEX, -1);

    let report = stage.check(&vocabulary());
    assert!(report.has_code(IssueCode::UnknownLabel));
    assert!(report.is_ok());
}

#[test]
fn voc_is_well_formed_xml() {
    let mut stage = stage_with_image(640, 480);
    stage.draw_box(&BoxSeed::new("R&D <cat>", 10.5, 20.0, 30.0, 40.0));
    stage.draw_box(&BoxSeed::new("dog", 600.0, 400.0, 100.0, 100.0));

    let xml = stage.export(ExportFormat::VocXml, &vocabulary(), Some("a&b.jpg"));
    let doc = roxmltree::Document::parse(&xml).expect("well-formed xml");
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "annotation");

    let text_of = |node: roxmltree::Node, tag: &str| {
        node.children()
            .find(|child| child.has_tag_name(tag))
            .and_then(|child| child.text())
            .map(str::to_string)
    };
    assert_eq!(text_of(root, "filename").as_deref(), Some("a&b.jpg"));
    assert!(text_of(root, "folder").is_some_and(|folder| folder.starts_with("VOC")));

    let objects: Vec<roxmltree::Node> = root
        .children()
        .filter(|child| child.has_tag_name("object"))
        .collect();
    assert_eq!(objects.len(), 2);
    assert_eq!(text_of(objects[0], "name").as_deref(), Some("R&D <cat>"));

    let bndbox = objects[1]
        .children()
        .find(|child| child.has_tag_name("bndbox"))
        .expect("bndbox");
    assert_eq!(text_of(bndbox, "xmin").as_deref(), Some("600"));
    assert_eq!(text_of(bndbox, "xmax").as_deref(), Some("640"));
    assert_eq!(text_of(bndbox, "ymin").as_deref(), Some("400"));
    assert_eq!(text_of(bndbox, "ymax").as_deref(), Some("480"));

    let size = root
        .children()
        .find(|child| child.has_tag_name("size"))
        .expect("size");
    assert_eq!(text_of(size, "width").as_deref(), Some("640"));
    assert_eq!(text_of(size, "height").as_deref(), Some("480"));
    assert_eq!(text_of(size, "depth").as_deref(), Some("3"));

    let element_order = root
        .children()
        .filter(|child| child.is_element())
        .map(|child| child.tag_name().name().to_string())
        .collect::<Vec<_>>();
    assert_eq!(
        element_order,
        vec!["filename", "folder", "object", "object", "size"]
    );
}

#[test]
fn export_file_names() {
    assert_eq!(export_file_name(Some("dog.jpg"), ExportFormat::VocXml), "dog.xml");
    assert_eq!(export_file_name(Some("dog.jpg"), ExportFormat::YoloTxt), "dog.txt");
    assert_eq!(export_file_name(Some("README"), ExportFormat::YoloTxt), "image.txt");
}

#[test]
fn export_without_background_has_no_image_size() {
    let mut stage = Stage::new(StageOptions::new(200.0, 100.0));
    let id = stage.create_box_with(Rect::new(50.0, 25.0, 100.0, 50.0), "cat");
    stage.normalize_box(id);

    assert_eq!(
        stage.export(ExportFormat::YoloTxt, &vocabulary(), None),
        "0 0 0 0 0"
    );
    let xml = stage.export(ExportFormat::VocXml, &vocabulary(), Some("cat.jpg"));
    assert!(xml.contains("<xmin>50</xmin><ymin>25</ymin><xmax>150</xmax><ymax>75</ymax>"));
    assert!(xml.contains("<size><width/><height/><depth>3</depth></size>"));
    assert!(stage.check(&vocabulary()).has_code(IssueCode::MissingImageSize));
}

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn voc_output_always_parses(
        rects in proptest::collection::vec(proptest_helpers::arb_rect_within(640, 480), 0..8),
        labels in proptest::collection::vec(proptest_helpers::label_strategy(), 8)
    ) {
        let boxes: Vec<boxer::change::BoxView> = rects
            .iter()
            .zip(labels.iter())
            .enumerate()
            .map(|(i, (rect, label))| boxer::change::BoxView {
                id: boxer::geometry::BoxId(i as u64 + 1),
                label: label.clone(),
                x: rect.x(),
                y: rect.y(),
                width: rect.width,
                height: rect.height,
                highlighted: false,
            })
            .collect();
        let image = ExportImage {
            file_name: Some("img.jpg".to_string()),
            width: 640.0,
            height: 480.0,
        };

        let xml = encode_voc_xml_for_year(&boxes, &image, 2024);
        let doc = roxmltree::Document::parse(&xml);
        prop_assert!(doc.is_ok(), "{}", xml);
        let doc = doc.expect("checked");
        let objects = doc
            .root_element()
            .children()
            .filter(|child| child.has_tag_name("object"))
            .count();
        prop_assert_eq!(objects, boxes.len());
    }

    #[test]
    fn yolo_values_stay_in_unit_range(
        rect in proptest_helpers::arb_rect_within(640, 480)
    ) {
        let mut stage = stage_with_image(640, 480);
        stage.draw_box(&BoxSeed::new("cat", rect.x(), rect.y(), rect.width, rect.height));
        let txt = stage.export(ExportFormat::YoloTxt, &vocabulary(), None);

        let fields: Vec<f64> = txt
            .split(' ')
            .skip(1)
            .map(|field| field.parse::<f64>().expect("number"))
            .collect();
        prop_assert_eq!(fields.len(), 4);
        for value in fields {
            prop_assert!((0.0..=1.0).contains(&value), "{} out of range in {}", value, txt);
        }
    }
}
