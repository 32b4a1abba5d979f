use super::grid::Grid;

/// Convert a dense sample grid into a non-indexed triangle list.
///
/// Every (width-1) × (height-1) cell of the grid contributes two triangles
/// sharing the cell diagonal: `{(x,y), (x+1,y), (x+1,y+1)}` followed by
/// `{(x+1,y+1), (x,y+1), (x,y)}`, six vertices per cell. When a color grid
/// is supplied each vertex carries its dense-grid color in the same order;
/// otherwise the returned color list is empty.
///
/// A grid with fewer than two samples on either axis has no cells and
/// yields an empty list.
#[must_use]
pub fn triangle_list(
    points: &Grid<[f64; 3]>,
    colors: Option<&Grid<[f64; 3]>>,
) -> (Vec<[f64; 3]>, Vec<[f64; 3]>) {
    let vertices = emit_cell_corners(points);
    let vertex_colors = colors.map(emit_cell_corners).unwrap_or_default();
    (vertices, vertex_colors)
}

fn emit_cell_corners(grid: &Grid<[f64; 3]>) -> Vec<[f64; 3]> {
    if grid.width() < 2 || grid.height() < 2 {
        return Vec::new();
    }

    let cell_count = (grid.width() - 1) * (grid.height() - 1);
    let mut list = Vec::with_capacity(cell_count * 6);

    for x in 0..grid.width() - 1 {
        for y in 0..grid.height() - 1 {
            list.extend_from_slice(&[
                *grid.get(x, y),
                *grid.get(x + 1, y),
                *grid.get(x + 1, y + 1),
                *grid.get(x + 1, y + 1),
                *grid.get(x, y + 1),
                *grid.get(x, y),
            ]);
        }
    }

    list
}

/// Number of triangles [`triangle_list`] emits for a dense grid of the
/// given dimensions.
#[must_use]
pub fn triangle_count_for(width: usize, height: usize) -> usize {
    if width < 2 || height < 2 {
        return 0;
    }
    (width - 1) * (height - 1) * 2
}
