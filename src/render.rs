//! Raster rendering of mazes and search progress, and a [FrameRecorder] that turns a search into
//! an animated GIF.
use core::fmt;
use crate::maze::Maze;
use crate::observer::{SearchObserver, Snapshot};
use crate::solver::{ExploredSet, SearchResult};
use crate::{MazeError, CELL_BORDER, CELL_SIZE, FRAMES_PER_SECOND};
use grid_util::point::Point;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageBuffer, Rgba, RgbaImage};
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub const WALL: Rgba<u8> = Rgba([40, 40, 40, 255]);
pub const START: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const GOAL: Rgba<u8> = Rgba([0, 171, 28, 255]);
pub const SOLUTION: Rgba<u8> = Rgba([220, 235, 113, 255]);
pub const EXPLORED: Rgba<u8> = Rgba([212, 97, 85, 255]);
pub const EMPTY: Rgba<u8> = Rgba([237, 240, 252, 255]);
const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// NeuQuant sampling factor; the palette is small so the fast end of 1..=30 loses nothing.
const GIF_QUANTIZER_SPEED: i32 = 10;

/// Which layers of search progress are drawn on top of the maze.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RenderOptions {
    pub show_solution: bool,
    pub show_explored: bool,
}

impl RenderOptions {
    pub fn new(show_solution: bool, show_explored: bool) -> RenderOptions {
        RenderOptions {
            show_solution,
            show_explored,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions::new(true, false)
    }
}

/// Colour of a single cell. Walls, start and goal take precedence over search progress; the cell
/// being expanded is highlighted like a solution cell.
pub fn cell_colour(snapshot: &Snapshot<'_>, options: &RenderOptions, p: &Point) -> Rgba<u8> {
    let maze = snapshot.maze;
    if maze.is_wall(*p) {
        WALL
    } else if *p == maze.start() {
        START
    } else if *p == maze.goal() {
        GOAL
    } else if snapshot.current == Some(*p)
        || (options.show_solution && snapshot.on_solution(p))
    {
        SOLUTION
    } else if options.show_explored && snapshot.is_explored(p) {
        EXPLORED
    } else {
        EMPTY
    }
}

/// Draws the snapshot with one [CELL_SIZE] square per cell on a black canvas.
pub fn render_maze(snapshot: &Snapshot<'_>, options: &RenderOptions) -> RgbaImage {
    let maze = snapshot.maze;
    let mut img: RgbaImage = ImageBuffer::from_pixel(
        maze.width() as u32 * CELL_SIZE,
        maze.height() as u32 * CELL_SIZE,
        BACKGROUND,
    );
    for row in 0..maze.height() as u32 {
        for col in 0..maze.width() as u32 {
            let fill = cell_colour(snapshot, options, &Point::new(col as i32, row as i32));
            // Both corners are inclusive, leaving a border on every side of the cell.
            for y in row * CELL_SIZE + CELL_BORDER..=(row + 1) * CELL_SIZE - CELL_BORDER {
                for x in col * CELL_SIZE + CELL_BORDER..=(col + 1) * CELL_SIZE - CELL_BORDER {
                    if x < img.width() && y < img.height() {
                        img.put_pixel(x, y, fill);
                    }
                }
            }
        }
    }
    img
}

/// Renders a finished search, or just the maze when `result` is [None], and saves it with the
/// format implied by the extension of `path`.
pub fn save_image<P: AsRef<Path>>(
    path: P,
    maze: &Maze,
    result: Option<&SearchResult>,
    options: &RenderOptions,
) -> Result<(), MazeError> {
    let empty = ExploredSet::default();
    let snapshot = Snapshot {
        maze,
        explored: result.map_or(&empty, |r| &r.explored),
        current: None,
        solution: result.map(|r| &r.solution),
        step: result.map_or(0, |r| r.states_explored),
    };
    render_maze(&snapshot, options).save(path.as_ref())?;
    info!("Wrote {}", path.as_ref().display());
    Ok(())
}

/// Streams one GIF frame per search step plus the closing frames into a file. Frames are encoded
/// as they arrive, so memory use does not grow with the length of the search.
pub struct FrameRecorder {
    encoder: GifEncoder<BufWriter<File>>,
    delay: Delay,
    frames: usize,
    error: Option<MazeError>,
}

impl FrameRecorder {
    /// Creates the animation file at `path`, looping forever at [FRAMES_PER_SECOND].
    pub fn create<P: AsRef<Path>>(path: P) -> Result<FrameRecorder, MazeError> {
        let file = BufWriter::new(File::create(path.as_ref())?);
        let mut encoder = GifEncoder::new_with_speed(file, GIF_QUANTIZER_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        info!("Recording frames to {}", path.as_ref().display());
        Ok(FrameRecorder {
            encoder,
            delay: Delay::from_numer_denom_ms(1000, FRAMES_PER_SECOND),
            frames: 0,
            error: None,
        })
    }

    /// Number of frames written so far.
    pub fn len(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    fn push(&mut self, buffer: RgbaImage) {
        // After the first failure the file is broken, keep only that error.
        if self.error.is_some() {
            return;
        }
        match self
            .encoder
            .encode_frame(Frame::from_parts(buffer, 0, 0, self.delay))
        {
            Ok(()) => self.frames += 1,
            Err(e) => {
                warn!("Failed to encode frame {}: {}", self.frames, e);
                self.error = Some(e.into());
            }
        }
    }

    /// Finishes the file, reporting the first error hit while encoding.
    pub fn assemble(self) -> Result<usize, MazeError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let frames = self.frames;
        // Dropping the encoder writes the GIF trailer.
        drop(self.encoder);
        info!("Wrote {} frames", frames);
        Ok(frames)
    }
}

impl fmt::Debug for FrameRecorder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FrameRecorder")
            .field("frames", &self.frames)
            .field("error", &self.error)
            .finish()
    }
}

impl SearchObserver for FrameRecorder {
    fn capture(&mut self, snapshot: &Snapshot<'_>) {
        self.push(render_maze(snapshot, &RenderOptions::new(false, true)));
    }

    fn finalize(&mut self, snapshot: &Snapshot<'_>) {
        self.push(render_maze(snapshot, &RenderOptions::new(true, true)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::MazeSolver;
    use crate::FINAL_FRAMES;
    use image::codecs::gif::GifDecoder;
    use image::AnimationDecoder;

    fn centre(row: u32, col: u32) -> (u32, u32) {
        (col * CELL_SIZE + CELL_SIZE / 2, row * CELL_SIZE + CELL_SIZE / 2)
    }

    #[test]
    fn colours_cells_and_borders() {
        let maze: Maze = "#A\nB ".parse().unwrap();
        let result = MazeSolver::bfs().solve(&maze).unwrap();
        let snapshot = Snapshot {
            maze: &maze,
            explored: &result.explored,
            current: None,
            solution: Some(&result.solution),
            step: result.states_explored,
        };
        let img = render_maze(&snapshot, &RenderOptions::new(true, true));
        assert_eq!(img.dimensions(), (2 * CELL_SIZE, 2 * CELL_SIZE));
        let at = |(x, y): (u32, u32)| *img.get_pixel(x, y);
        assert_eq!(at(centre(0, 0)), WALL);
        assert_eq!(at(centre(0, 1)), START);
        assert_eq!(at(centre(1, 0)), GOAL);
        assert_eq!(at((0, 0)), BACKGROUND);
        assert_eq!(at((CELL_BORDER, CELL_BORDER)), WALL);
    }

    #[test]
    fn explored_and_solution_layers() {
        let maze: Maze = "A   B".parse().unwrap();
        let result = MazeSolver::bfs().solve(&maze).unwrap();
        let snapshot = Snapshot {
            maze: &maze,
            explored: &result.explored,
            current: None,
            solution: Some(&result.solution),
            step: result.states_explored,
        };
        let explored_only = render_maze(&snapshot, &RenderOptions::new(false, true));
        let (x, y) = centre(0, 2);
        assert_eq!(*explored_only.get_pixel(x, y), EXPLORED);
        let with_solution = render_maze(&snapshot, &RenderOptions::new(true, true));
        assert_eq!(*with_solution.get_pixel(x, y), SOLUTION);
        let bare = render_maze(&snapshot, &RenderOptions::new(false, false));
        assert_eq!(*bare.get_pixel(x, y), EMPTY);
    }

    /// The cell being expanded is highlighted even though the solution layer is off.
    #[test]
    fn current_cell_is_highlighted() {
        let maze: Maze = "A #\n  B\n".parse().unwrap();
        let explored = ExploredSet::default();
        let snapshot = Snapshot {
            maze: &maze,
            explored: &explored,
            current: Some(Maze::cell(1, 0)),
            solution: None,
            step: 2,
        };
        let img = render_maze(&snapshot, &RenderOptions::new(false, true));
        let (x, y) = centre(1, 0);
        assert_eq!(*img.get_pixel(x, y), SOLUTION);
        let (x, y) = centre(1, 1);
        assert_eq!(*img.get_pixel(x, y), EMPTY);
    }

    /// Every step and every closing frame ends up in the file as a separate GIF frame.
    #[test]
    fn recorder_streams_one_frame_per_step() {
        let maze: Maze = "A #\n  B\n".parse().unwrap();
        let path = std::env::temp_dir().join(format!("recorder_{}.gif", std::process::id()));
        let mut recorder = FrameRecorder::create(&path).unwrap();
        let result = MazeSolver::bfs()
            .solve_observed(&maze, &mut recorder)
            .unwrap();
        assert_eq!(recorder.len(), result.states_explored + FINAL_FRAMES);
        assert_eq!(recorder.assemble().unwrap(), result.states_explored + FINAL_FRAMES);

        let file = std::io::BufReader::new(File::open(&path).unwrap());
        let frames = GifDecoder::new(file)
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(frames.len(), result.states_explored + FINAL_FRAMES);
        assert_eq!(
            frames[0].buffer().dimensions(),
            (3 * CELL_SIZE, 2 * CELL_SIZE)
        );
        std::fs::remove_file(&path).unwrap();
    }
}
