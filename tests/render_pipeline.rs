use aksel_raster::{
    render_all, union_bounding_rect, CBox, Drawable, Image, Matrix, PixelRect, PlotRect,
    RenderStyle, RenderTarget,
};
use image::Rgb;

fn bitmap_style() -> RenderStyle {
    RenderStyle {
        system_font: false,
        font_size: 8.0,
        ..RenderStyle::default()
    }
}

fn gray(value: u8) -> Rgb<u8> {
    Rgb([value, value, value])
}

#[test]
fn image_and_colorbar_share_one_canvas() {
    let mat = Matrix::new(2, 2, 1, vec![0u8, 85, 170, 255]).unwrap();
    let mut drawables: Vec<Box<dyn Drawable>> = vec![
        Box::new(Image::new(mat)),
        Box::new(CBox::new(None, 0.0, 255.0)),
    ];

    let data = union_bounding_rect(&drawables).unwrap();
    assert_eq!(data, PlotRect::new(0.0, 0.0, 2.0, 2.0));

    let mut target =
        RenderTarget::with_canvas(200, 60, PixelRect::new(10, 10, 40, 40), data, bitmap_style())
            .unwrap();
    render_all(&mut drawables, &mut target).unwrap();
    let canvas = target.into_image();

    // each cell covers 20x20 pixels, row 0 at the bottom
    assert_eq!(canvas.get_pixel(15, 45), &gray(0));
    assert_eq!(canvas.get_pixel(35, 45), &gray(85));
    assert_eq!(canvas.get_pixel(15, 25), &gray(170));
    assert_eq!(canvas.get_pixel(35, 15), &gray(255));

    // outside the inner rectangle and left of the colorbar
    assert_eq!(canvas.get_pixel(5, 5), &gray(255));
    assert_eq!(canvas.get_pixel(55, 30), &gray(255));

    // strip starts at the inner right edge plus the margin
    let top = canvas.get_pixel(70, 11).0[0];
    let bottom = canvas.get_pixel(70, 48).0[0];
    assert!(top > 240, "top of the strip is {top}");
    assert!(bottom < 15, "bottom of the strip is {bottom}");
}

#[test]
fn colorbar_reports_ticks_inside_its_range() {
    let mut target = RenderTarget::with_canvas(
        200,
        220,
        PixelRect::new(10, 10, 40, 200),
        PlotRect::new(0.0, 0.0, 1.0, 1.0),
        bitmap_style(),
    )
    .unwrap();
    let mut cbox = CBox::new(None, -1.0, 1.0);
    cbox.set_label("amplitude");
    cbox.render(&mut target).unwrap();

    let ticks = cbox.ticks();
    assert!(ticks.len() >= 2);
    assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(ticks.iter().all(|tick| (-1.0..=1.0).contains(tick)));
    assert!(ticks.contains(&0.0));
    assert!(cbox.width() > bitmap_style().margin + bitmap_style().strip_width);
}

#[test]
fn nan_cells_use_the_nan_color() {
    let mat = Matrix::new(1, 2, 1, vec![f32::NAN, 1.0]).unwrap();
    let mut image = Image::new(mat);
    image.set_nan_color(Rgb([255, 0, 0]));

    let mut target = RenderTarget::with_canvas(
        20,
        10,
        PixelRect::new(0, 0, 20, 10),
        image.bounding_rect().unwrap(),
        bitmap_style(),
    )
    .unwrap();
    image.render(&mut target).unwrap();

    let canvas = target.outer_mat();
    assert_eq!(canvas.get_pixel(2, 5), &Rgb([255, 0, 0]));
    assert_ne!(canvas.get_pixel(17, 5), &Rgb([255, 0, 0]));
}

#[test]
fn resizing_the_inner_rect_moves_the_image() {
    let mat = Matrix::new(1, 1, 3, vec![0u8, 0, 255]).unwrap();
    let mut image = Image::new(mat);
    let mut target = RenderTarget::with_canvas(
        30,
        30,
        PixelRect::new(0, 0, 10, 10),
        PlotRect::new(0.0, 0.0, 1.0, 1.0),
        bitmap_style(),
    )
    .unwrap();

    assert!(target.set_inner_rect(PixelRect::new(25, 25, 10, 10)).is_err());
    assert_eq!(target.inner_rect(), PixelRect::new(0, 0, 10, 10));

    target
        .set_inner_rect(PixelRect::new(20, 20, 10, 10))
        .unwrap();
    image.render(&mut target).unwrap();

    let canvas = target.outer_mat();
    assert_eq!(canvas.get_pixel(25, 25), &Rgb([0, 0, 255]));
    assert_eq!(canvas.get_pixel(5, 5), &gray(255));
}
