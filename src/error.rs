use thiserror::Error;

/// Errors raised while loading, searching or rendering a maze.
#[derive(Debug, Error)]
pub enum MazeError {
    /// The maze text does not contain exactly one start and exactly one goal.
    #[error("malformed maze: {0}")]
    MalformedMaze(String),
    /// [Frontier::remove](crate::frontier::Frontier::remove) was called on an empty frontier.
    /// The solver never lets this escape; it becomes [MazeError::NoSolution].
    #[error("empty frontier")]
    EmptyFrontier,
    /// The frontier ran dry before the goal was reached.
    #[error("no solution after exploring {explored} states")]
    NoSolution { explored: usize },
    #[error("unknown search strategy '{0}', expected dfs or bfs")]
    UnknownStrategy(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
