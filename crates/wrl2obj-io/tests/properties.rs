use proptest::prelude::*;

use wrl2obj_core::document::{Document, IndexGroup, Material, MaterialBinding, Point3, Scalar, Separator};
use wrl2obj_io::{parse_wrl, ObjWriter, WrlWriter};

fn scalar() -> impl Strategy<Value = Scalar> {
    (any::<bool>(), 0u32..2000, 0u32..1_000_000, 1usize..7).prop_map(|(neg, whole, frac, digits)| {
        let frac = format!("{:06}", frac);
        let text = format!("{}{}.{}", if neg { "-" } else { "" }, whole, &frac[..digits]);
        Scalar::parse(&text).unwrap()
    })
}

fn point() -> impl Strategy<Value = Point3> {
    (scalar(), scalar(), scalar()).prop_map(|(x, y, z)| [x, y, z])
}

fn color() -> impl Strategy<Value = Point3> {
    let channel = || prop_oneof![Just(0.0), Just(0.5), Just(1.0)].prop_map(Scalar::from_value);
    (channel(), channel(), channel()).prop_map(|(r, g, b)| [r, g, b])
}

fn groups(num_vertices: usize, arity: usize) -> BoxedStrategy<Option<Vec<IndexGroup>>> {
    if num_vertices == 0 {
        return prop_oneof![Just(None), Just(Some(Vec::new()))].boxed();
    }
    prop::option::of(prop::collection::vec(
        prop::collection::vec(0..num_vertices, arity),
        0..5,
    ))
    .boxed()
}

fn separator() -> impl Strategy<Value = Separator> {
    (0usize..6).prop_flat_map(|n| {
        let coords = if n == 0 {
            prop_oneof![Just(None), Just(Some(Vec::new()))].boxed()
        } else {
            prop::collection::vec(point(), n).prop_map(Some).boxed()
        };
        let binding = prop::option::of(prop_oneof![
            Just(MaterialBinding::PerVertex),
            Just(MaterialBinding::PerFace),
        ]);
        let material = prop::option::of(
            (
                prop::collection::vec(color(), 0..4),
                prop::collection::vec(scalar(), 0..3),
            )
                .prop_map(|(diffuse_colors, transparencies)| Material {
                    diffuse_colors,
                    transparencies,
                }),
        );
        (coords, binding, material, groups(n, 2), groups(n, 3)).prop_map(
            |(coords, binding, material, indexed_lines, indexed_faces)| Separator {
                coords,
                binding,
                material,
                indexed_lines,
                indexed_faces,
            },
        )
    })
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(separator(), 0..6).prop_map(Document::new)
}

fn to_obj(document: &Document) -> String {
    let mut writer = ObjWriter::new();
    writer.add_document(document).unwrap();
    writer.to_obj_string().unwrap()
}

proptest! {
    #[test]
    fn reserialized_documents_parse_back_equal(doc in document()) {
        let mut writer = WrlWriter::new();
        writer.add_document(&doc).unwrap();
        let text = writer.to_wrl_string().unwrap();
        prop_assert_eq!(parse_wrl(&text).unwrap(), doc);
    }

    #[test]
    fn vertex_lines_match_coordinate_count(doc in document()) {
        let obj = to_obj(&doc);
        let count = obj.lines().filter(|l| l.starts_with("v ")).count();
        prop_assert_eq!(count, doc.num_vertices());

        let expected: Vec<String> = doc
            .separators()
            .iter()
            .flat_map(|s| s.coords().iter())
            .map(|p| format!("v {} {} {}", p[0], p[1], p[2]))
            .collect();
        let actual: Vec<&str> = obj.lines().filter(|l| l.starts_with("v ")).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn indices_refer_to_declared_vertices(doc in document()) {
        let obj = to_obj(&doc);
        let total = doc.num_vertices();
        for line in obj.lines().filter(|l| l.starts_with("f ") || l.starts_with("l ")) {
            let mut parts = line.split(' ');
            let kind = parts.next().unwrap();
            let indices: Vec<usize> = parts.map(|p| p.parse().unwrap()).collect();
            prop_assert_eq!(indices.len(), if kind == "f" { 3 } else { 2 });
            for i in indices {
                prop_assert!((1..=total).contains(&i), "{} out of 1..={}", i, total);
            }
        }
    }

    #[test]
    fn vertices_precede_objects(doc in document()) {
        let obj = to_obj(&doc);
        let lines: Vec<&str> = obj.lines().collect();
        prop_assert!(lines[0].starts_with("# "));
        let first_object = lines.iter().position(|l| l.starts_with("o ")).unwrap_or(lines.len());
        prop_assert!(lines[1..first_object].iter().all(|l| l.starts_with("v ")));
        prop_assert!(lines[first_object..].iter().all(|l| !l.starts_with("v ")));
        prop_assert_eq!(
            lines.iter().filter(|l| l.starts_with("o ")).count(),
            doc.num_separators()
        );
    }
}
