use lifeview::color::Rgb;
use lifeview::config::ViewportGeometry;
use lifeview::grid::GridDimensions;
use lifeview::surface::Raster;
use lifeview::surface::Surface;
use lifeview::view;

fn ascii(raster: &Raster, geometry: &ViewportGeometry) -> String {
    raster
        .to_ascii(|px| match px {
            px if px == geometry.grid_color => '#',
            px if px == geometry.alive_color => 'o',
            px if px == geometry.dead_color => '.',
            _ => '?',
        })
        .trim_end()
        .to_string()
}

fn render(cells: &[u8], dims: GridDimensions, cell_size: u32) -> anyhow::Result<String> {
    let geometry = ViewportGeometry::with_cell_size(cell_size)?;
    let (w, h) = geometry.surface_size(dims);
    let mut raster = Raster::new(w, h);

    view::draw(cells, dims, &geometry, &mut raster)?;

    Ok(ascii(&raster, &geometry))
}

#[test]
fn two_by_two_diagonal() -> anyhow::Result<()> {
    // cells 0 and 3
    let s = render(&[0b0000_1001], GridDimensions::new(2, 2), 1)?;

    insta::assert_snapshot!(s, @r"
    #####
    #o#.#
    #####
    #.#o#
    #####
    ");

    Ok(())
}

#[test]
fn row_major_order_across_bytes() -> anyhow::Result<()> {
    // 3x3: cells 2 (row 0, col 2) and 8 (row 2, col 2), the latter in the second byte
    let s = render(&[0b0000_0100, 0b0000_0001], GridDimensions::new(3, 3), 2)?;

    insta::assert_snapshot!(s, @r"
    ##########
    #..#..#oo#
    #..#..#oo#
    ##########
    #..#..#..#
    #..#..#..#
    ##########
    #..#..#oo#
    #..#..#oo#
    ##########
    ");

    Ok(())
}

#[test]
fn eight_by_eight_surface_is_137px() {
    let geometry = ViewportGeometry::default();
    let dims = GridDimensions::new(8, 8);
    let (w, h) = geometry.surface_size(dims);
    let mut raster = Raster::new(w, h);

    view::draw(&[0; 8], dims, &geometry, &mut raster).unwrap();

    assert_eq!(raster.size(), (137, 137));

    // every cell interior is dead, every line pixel is grid colored
    for y in 0..137 {
        for x in 0..137 {
            let on_line = x % 17 == 0 || y % 17 == 0;
            let expected = if on_line {
                geometry.grid_color
            } else {
                geometry.dead_color
            };

            assert_eq!(raster.pixel(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn every_bit_lands_on_its_cell() {
    let dims = GridDimensions::new(5, 3);
    let geometry = ViewportGeometry::with_cell_size(1).unwrap();

    for n in 0..dims.cell_count() {
        let mut cells = vec![0u8; dims.packed_len()];
        cells[n / 8] |= 1 << (n % 8);

        let (w, h) = geometry.surface_size(dims);
        let mut raster = Raster::new(w, h);
        view::draw(&cells, dims, &geometry, &mut raster).unwrap();

        let (row, col) = (n as u32 / dims.width, n as u32 % dims.width);
        let alive: Vec<_> = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| raster.pixel(x, y) == geometry.alive_color)
            .collect();

        assert_eq!(alive, vec![(2 * col + 1, 2 * row + 1)], "cell {n}");
    }
}

#[test]
fn custom_colors_are_used() {
    let red = Rgb::new(0xFF, 0, 0);
    let green = Rgb::new(0, 0xFF, 0);
    let blue = Rgb::new(0, 0, 0xFF);
    let geometry = ViewportGeometry::new(1, red, green, blue).unwrap();
    let dims = GridDimensions::new(1, 1);
    let mut raster = Raster::new(3, 3);

    view::draw(&[1], dims, &geometry, &mut raster).unwrap();
    assert_eq!(raster.pixel(1, 1), blue);
    assert_eq!(raster.pixel(0, 0), red);

    view::draw(&[0], dims, &geometry, &mut raster).unwrap();
    assert_eq!(raster.pixel(1, 1), green);
}
