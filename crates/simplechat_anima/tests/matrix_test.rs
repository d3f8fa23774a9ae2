use serde_json::Value;
use simplechat_anima::{
    AnimaField, MatrixMode, PairJoin, SameFieldBehavior, XyCellPrefix, XyMatrix,
};

fn cell(text: &str) -> anyhow::Result<Value> {
    Ok(serde_json::from_str(text)?)
}

#[test]
fn cells_are_row_major_by_y() -> anyhow::Result<()> {
    let matrix = XyMatrix::builder()
        .x_list("@a\n@b\n@c")
        .y_list("street\n# skipped\nbeach")
        .build()?;
    let grid = matrix.build(r#"{"tags": "solo", "environment": "room"}"#)?;

    assert_eq!(*grid.columns(), 3);
    assert_eq!(grid.cells().len(), 6);
    assert_eq!(grid.x_labels(), "@a\n@b\n@c");
    assert_eq!(grid.y_labels(), "street\nbeach");

    let fourth = cell(&grid.cells()[3])?;
    assert_eq!(fourth["artist"], "@a");
    assert_eq!(fourth["environment"], "beach");
    assert_eq!(fourth["positive"], "@a, beach, solo");
    Ok(())
}

#[test]
fn same_field_combines_and_collapses_diagonal() -> anyhow::Result<()> {
    let matrix = XyMatrix::builder()
        .x_field(AnimaField::Artist)
        .y_field(AnimaField::Artist)
        .x_list("@a\n@b")
        .pair_join(PairJoin::Comma)
        .build()?;
    let grid = matrix.build("{}")?;

    let artists: Vec<Value> = grid
        .cells()
        .iter()
        .map(|c| cell(c).map(|v| v["artist"].clone()))
        .collect::<anyhow::Result<_>>()?;
    assert_eq!(artists, vec!["@a", "@b, @a", "@a, @b", "@b"]);
    Ok(())
}

#[test]
fn custom_joiner_honors_escaped_newline() -> anyhow::Result<()> {
    let matrix = XyMatrix::builder()
        .y_field(AnimaField::Artist)
        .x_list("@a")
        .y_list("@b")
        .pair_join(PairJoin::Custom)
        .custom_join(r" | \n")
        .build()?;
    let grid = matrix.build("{}")?;
    assert_eq!(cell(&grid.cells()[0])?["artist"], "@a | \n@b");
    Ok(())
}

#[test]
fn same_field_override_prefers_y() -> anyhow::Result<()> {
    let matrix = XyMatrix::builder()
        .y_field(AnimaField::Artist)
        .same_field(SameFieldBehavior::Override)
        .x_list("@a")
        .y_list("@b")
        .build()?;
    let grid = matrix.build("{}")?;
    assert_eq!(cell(&grid.cells()[0])?["artist"], "@b");
    Ok(())
}

#[test]
fn neg_axis_syncs_negative_and_environment_can_be_excluded() -> anyhow::Result<()> {
    let matrix = XyMatrix::builder()
        .x_field(AnimaField::Neg)
        .x_list("lowres")
        .y_list("")
        .auto_y_from_x(false)
        .include_environment(false)
        .build()?;
    let grid = matrix.build(
        "// edited by hand\n{\n  \"negative\": \"old\"\n  \"environment\": \"room\"\n}",
    )?;

    let only = cell(&grid.cells()[0])?;
    assert_eq!(only["neg"], "lowres");
    assert_eq!(only["negative"], "lowres");
    assert_eq!(only["environment"], "");
    assert_eq!(only["positive"], "");
    Ok(())
}

#[test]
fn prefixes_follow_matrix_modes() -> anyhow::Result<()> {
    let labels = "@a\n@b\n@c";
    let upper = XyCellPrefix::builder()
        .mode(MatrixMode::UpperTriangle)
        .joiner("_x_")
        .build()?
        .build(labels, labels);
    assert_eq!(upper, vec!["@a", "@b_x_@a", "@c_x_@a", "@b", "@c_x_@b", "@c"]);

    let diagonal = XyCellPrefix::builder()
        .mode(MatrixMode::DiagonalOnly)
        .base_prefix("xy/")
        .build()?
        .build(labels, labels);
    assert_eq!(diagonal, vec!["xy_@a", "xy_@b", "xy_@c"]);

    let uneven = XyCellPrefix::builder()
        .mode(MatrixMode::DiagonalOnly)
        .build()?
        .build(labels, "night");
    assert_eq!(uneven.len(), 3);
    Ok(())
}

#[test]
fn empty_labels_fall_back_to_cell() {
    assert_eq!(XyCellPrefix::default().build("", "# none"), vec!["cell"]);
}
