use std::fmt;

use ndview_core::num::Capabilities;
use ndview_core::range::RangeSource;

use super::*;

const BORDER: Argb = Argb::opaque(0xEE, 0xEE, 0x40);
const FLAGGED: Argb = Argb::opaque(0xFF, 0x00, 0xFF);
const WHITE: Argb = Argb::opaque(0xFF, 0xFF, 0xFF);

fn colors() -> RenderColors {
    RenderColors {
        background: Argb::BLACK,
        border: BORDER,
        flagged: FLAGGED,
    }
}

fn render<T: Element>(
    dataset: &Dataset<T>,
    viewport: &Viewport,
) -> Result<(Raster, RenderReport), ViewError> {
    let plane = PlaneSelection::default_for(dataset.dims())?;
    let range = DisplayRange::compute(dataset, true)?;
    render_plane(&RenderParams {
        dataset,
        plane: &plane,
        viewport,
        range: &range,
        synth: &ColorSynthesizer::default(),
        ctx: &RatioContext::default(),
        colors: colors(),
    })
}

#[test]
fn test_small_dataset_centered_with_border() {
    let ds = Dataset::from_fn("small", vec![10, 10], |idx| (idx[0] + 10 * idx[1]) as u8);
    let vp = Viewport::new((1024, 1024), (10, 10));
    let (raster, report) = render(&ds, &vp).unwrap();
    assert_eq!(RenderReport::default(), report);
    assert_eq!((1024, 1024), (raster.width(), raster.height()));

    assert_eq!(Some(Argb::BLACK), raster.get(0, 0));
    assert_eq!(Some(Argb::BLACK), raster.get(1023, 1023));
    // Data occupies pixels 507..=516 along both axes.
    assert_eq!(Some(WHITE), raster.get(516, 516));
    assert_eq!(Some(Argb::opaque(0, 0, 0)), raster.get(507, 507));
    // Border just outside it.
    for &(x, y) in &[(506, 506), (506, 510), (517, 517), (510, 517), (511, 506)] {
        assert_eq!(Some(BORDER), raster.get(x, y), "pixel ({}, {})", x, y);
    }
    for &(x, y) in &[(505, 505), (506, 505), (518, 518), (510, 518)] {
        assert_eq!(Some(Argb::BLACK), raster.get(x, y), "pixel ({}, {})", x, y);
    }
    let border_count = raster.pixels().iter().filter(|&&c| c == BORDER).count();
    assert_eq!(4 * 11, border_count);
}

#[test]
fn test_magnified_blocks() {
    let ds = Dataset::from_flat("blocks", vec![3, 2], vec![0_u8, 255, 0, 255, 0, 255]).unwrap();
    let mut vp = Viewport::new((9, 9), (3, 2));
    vp.set_view(Scale::Magnify(3), (0, 0));
    let (raster, _) = render(&ds, &vp).unwrap();
    for y in 0..3 {
        for x in 3..6 {
            assert_eq!(Some(WHITE), raster.get(x, y));
        }
        for x in 0..3 {
            assert_eq!(Some(Argb::opaque(0, 0, 0)), raster.get(x, y));
        }
    }
    // Cell (0, 1) is 255.
    assert_eq!(Some(WHITE), raster.get(2, 5));
    // The left, right, and top edges are outside the pane; the bottom edge is
    // on row 6.
    for x in 0..9 {
        assert_eq!(Some(BORDER), raster.get(x, 6));
    }
    assert_eq!(Some(Argb::BLACK), raster.get(0, 7));
}

#[test]
fn test_minified_sampling() {
    let ds = Dataset::from_fn("wide", vec![9, 3], |idx| if idx[0] % 3 == 0 { 200_u8 } else { 10 });
    let mut vp = Viewport::new((3, 3), (9, 3));
    vp.set_view(Scale::Minify(3), (0, 0));
    let (raster, _) = render(&ds, &vp).unwrap();
    for x in 0..3 {
        assert_eq!(Some(WHITE), raster.get(x, 0));
        assert_eq!(Some(BORDER), raster.get(x, 1));
        assert_eq!(Some(Argb::BLACK), raster.get(x, 2));
    }
}

#[test]
fn test_unparseable_values_are_flagged() {
    let ds = Dataset::from_flat("nan", vec![2, 2], vec![1.0, f64::NAN, 2.0, f64::NAN]).unwrap();
    let mut vp = Viewport::new((2, 2), (2, 2));
    vp.set_view(Scale::UNITY, (0, 0));
    let (raster, report) = render(&ds, &vp).unwrap();
    assert_eq!(2, report.flagged_cells);
    assert_eq!(Some("NaN".to_owned()), report.first_flagged_value);
    assert_eq!(Some(FLAGGED), raster.get(1, 0));
    assert_eq!(Some(FLAGGED), raster.get(1, 1));
    assert_eq!(Some(Argb::opaque(0, 0, 0)), raster.get(0, 0));
    assert_eq!(Some(WHITE), raster.get(0, 1));
}

#[test]
fn test_native_colors_pass_through() {
    let translucent = Argb::new(0x40, 1, 2, 3);
    let ds = Dataset::from_fn("colors", vec![1, 1], |_| translucent);
    let mut vp = Viewport::new((1, 1), (1, 1));
    vp.set_view(Scale::UNITY, (0, 0));
    let (raster, _) = render(&ds, &vp).unwrap();
    assert_eq!(&[translucent], raster.pixels());
}

#[derive(Debug, Clone)]
struct Blob;
impl fmt::Display for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("blob")
    }
}
impl Element for Blob {
    const TYPE_NAME: &'static str = "Blob";
    fn capabilities() -> Capabilities<Self> {
        Capabilities::none()
    }
}

#[test]
fn test_unsupported_type_aborts_render() {
    let ds = Dataset::from_fn("blobs", vec![2, 2], |_| Blob);
    let vp = Viewport::new((4, 4), (2, 2));
    let plane = PlaneSelection::default_for(ds.dims()).unwrap();
    let result = render_plane(&RenderParams {
        dataset: &ds,
        plane: &plane,
        viewport: &vp,
        range: &DisplayRange::default_range(),
        synth: &ColorSynthesizer::default(),
        ctx: &RatioContext::default(),
        colors: colors(),
    });
    assert_eq!(
        Err(ViewError::UnsupportedValueType { type_name: "Blob" }),
        result
    );
}

#[test]
fn test_fixed_axis_position() {
    let ds = Dataset::from_fn("stack", vec![2, 2, 3], |idx| (idx[2] * 100) as u16);
    let range = DisplayRange::from_bounds(0, 200, RangeSource::Data).unwrap();
    let mut vp = Viewport::new((2, 2), (2, 2));
    vp.set_view(Scale::UNITY, (0, 0));
    let plane = PlaneSelection::try_new(ds.dims(), vec![0, 0, 2], 0, Some(1)).unwrap();
    let (raster, _) = render_plane(&RenderParams {
        dataset: &ds,
        plane: &plane,
        viewport: &vp,
        range: &range,
        synth: &ColorSynthesizer::default(),
        ctx: &RatioContext::default(),
        colors: colors(),
    })
    .unwrap();
    assert!(raster.pixels().iter().all(|&c| c == WHITE));
}

#[test]
fn test_raster_to_dataset() {
    let ds = Dataset::from_fn("small", vec![3, 2], |idx| (idx[0] * 100) as u8);
    let mut vp = Viewport::new((5, 4), (3, 2));
    vp.set_view(Scale::UNITY, (-1, -1));
    let (raster, _) = render(&ds, &vp).unwrap();
    let snapshot = raster.to_dataset("snap");
    assert_eq!(&[5, 4], snapshot.dims());
    assert_eq!("X", snapshot.axes()[0].label);
    for y in 0..4 {
        for x in 0..5 {
            assert_eq!(
                raster.get(x, y).as_ref(),
                snapshot.get(&[x as usize, y as usize])
            );
        }
    }
    assert_eq!(Some(BORDER), raster.get(0, 0));
    assert_eq!(5 * 4 * 4, raster.to_rgba_bytes().len());
}
