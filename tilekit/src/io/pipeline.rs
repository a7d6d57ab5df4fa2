//! Composable processing steps used by the tile workers.

use std::marker::PhantomData;

use crate::{coords::TileCoords, render::TileBuckets, tile::LoadError};

/// Receives the outcome of a tile pipeline run.
pub trait PipelineProcessor {
    fn tile_finished(&mut self, _coords: &TileCoords, _buckets: TileBuckets) {}
    fn tile_failed(&mut self, _coords: &TileCoords, _reason: &LoadError) {}
}

pub struct PipelineContext {
    pub processor: Box<dyn PipelineProcessor>,
}

impl PipelineContext {
    pub fn new(processor: impl PipelineProcessor + 'static) -> Self {
        Self {
            processor: Box::new(processor),
        }
    }
}

pub trait Processable {
    type Input;
    type Output;

    fn process(&self, input: Self::Input, context: &mut PipelineContext) -> Self::Output;
}

pub struct PipelineStep<P, N>
where
    P: Processable,
    N: Processable<Input = P::Output>,
{
    process: P,
    next: N,
}

impl<P, N> PipelineStep<P, N>
where
    P: Processable,
    N: Processable<Input = P::Output>,
{
    pub fn new(process: P, next: N) -> Self {
        Self { process, next }
    }
}

impl<P, N> Processable for PipelineStep<P, N>
where
    P: Processable,
    N: Processable<Input = P::Output>,
{
    type Input = P::Input;
    type Output = N::Output;

    fn process(&self, input: Self::Input, context: &mut PipelineContext) -> Self::Output {
        let output = self.process.process(input, context);
        self.next.process(output, context)
    }
}

pub struct EndStep<I> {
    phantom: PhantomData<I>,
}

impl<I> Default for EndStep<I> {
    fn default() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<I> Processable for EndStep<I> {
    type Input = I;
    type Output = I;

    fn process(&self, input: Self::Input, _context: &mut PipelineContext) -> Self::Output {
        input
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::{
        coords::TileCoords,
        io::pipeline::{EndStep, PipelineContext, PipelineProcessor, PipelineStep, Processable},
        render::TileBuckets,
        tile::LoadError,
    };

    #[derive(Default)]
    struct Outcomes {
        finished: Vec<TileCoords>,
        failed: Vec<TileCoords>,
    }

    struct RecordingProcessor(Rc<RefCell<Outcomes>>);

    impl PipelineProcessor for RecordingProcessor {
        fn tile_finished(&mut self, coords: &TileCoords, _buckets: TileBuckets) {
            self.0.borrow_mut().finished.push(*coords);
        }

        fn tile_failed(&mut self, coords: &TileCoords, _reason: &LoadError) {
            self.0.borrow_mut().failed.push(*coords);
        }
    }

    struct AddOne;

    impl Processable for AddOne {
        type Input = u32;
        type Output = u8;

        fn process(&self, input: Self::Input, _context: &mut PipelineContext) -> Self::Output {
            input as u8 + 1
        }
    }

    struct Add(u32);

    impl Processable for Add {
        type Input = u8;
        type Output = u32;

        fn process(&self, input: Self::Input, _context: &mut PipelineContext) -> Self::Output {
            input as u32 + self.0
        }
    }

    struct Publish(TileCoords);

    impl Processable for Publish {
        type Input = Result<TileBuckets, LoadError>;
        type Output = ();

        fn process(&self, input: Self::Input, context: &mut PipelineContext) -> Self::Output {
            match input {
                Ok(buckets) => context.processor.tile_finished(&self.0, buckets),
                Err(reason) => context.processor.tile_failed(&self.0, &reason),
            }
        }
    }

    fn context() -> (PipelineContext, Rc<RefCell<Outcomes>>) {
        let outcomes = Rc::new(RefCell::new(Outcomes::default()));
        let context = PipelineContext::new(RecordingProcessor(outcomes.clone()));
        (context, outcomes)
    }

    #[test]
    fn test_chained_steps() {
        let (mut context, _) = context();

        let output: u32 = PipelineStep::new(Add(2), EndStep::default()).process(5u8, &mut context);
        assert_eq!(output, 7);

        let output = PipelineStep::new(AddOne, PipelineStep::new(Add(2), EndStep::default()))
            .process(5u32, &mut context);
        assert_eq!(output, 8);
    }

    #[test]
    fn test_processor_callbacks() {
        let (mut context, outcomes) = context();
        let coords = TileCoords::from((3, 5, 4));
        let publish = PipelineStep::new(Publish(coords), EndStep::default());

        publish.process(Ok(TileBuckets::default()), &mut context);
        publish.process(Err(LoadError::Cancelled), &mut context);

        let outcomes = outcomes.borrow();
        assert_eq!(outcomes.finished, vec![coords]);
        assert_eq!(outcomes.failed, vec![coords]);
    }
}
