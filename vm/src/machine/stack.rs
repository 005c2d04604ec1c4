use crate::error::RuntimeError;
use crate::specs::WORD;

/// Descending stack carved out of the top of the VM's memory buffer.
///
/// The program image sits at the bottom of the same buffer; `floor` marks its
/// end so the stack can never grow into it. Variables are addressed relative
/// to the base pointer: offset `o` lives at `bp - o`.
#[derive(Debug)]
pub struct Stack {
    memory: Box<[u8]>,
    sp: usize,
    bp: usize,
    floor: usize,
}

impl Stack {
    /// Create an empty stack at the top of `memory`, above a program image of
    /// `floor` bytes.
    pub fn new(memory: Box<[u8]>, floor: usize) -> Self {
        let top = memory.len();
        Self {
            memory,
            sp: top,
            bp: top,
            floor,
        }
    }

    #[inline]
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    #[inline]
    pub fn sp(&self) -> usize {
        self.sp
    }

    #[inline]
    pub fn bp(&self) -> usize {
        self.bp
    }

    pub fn push(&mut self, word: [u8; 4]) -> Result<(), RuntimeError> {
        if self.sp < self.floor + WORD {
            return Err(RuntimeError::StackOverflow {
                sp: self.sp,
                floor: self.floor,
            });
        }
        self.sp -= WORD;
        self.memory[self.sp..self.sp + WORD].copy_from_slice(&word);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<[u8; 4], RuntimeError> {
        if self.sp + WORD > self.memory.len() {
            return Err(RuntimeError::StackUnderflow { sp: self.sp });
        }
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.memory[self.sp..self.sp + WORD]);
        self.sp += WORD;
        Ok(word)
    }

    pub fn pop_i32(&mut self) -> Result<i32, RuntimeError> {
        self.pop().map(i32::from_le_bytes)
    }

    pub fn pop_f32(&mut self) -> Result<f32, RuntimeError> {
        self.pop().map(f32::from_le_bytes)
    }

    /// Link a new frame to the current one and reserve `size` bytes for its
    /// variables.
    pub fn setup_frame(&mut self, size: i32) -> Result<(), RuntimeError> {
        let size = usize::try_from(size).map_err(|_| RuntimeError::InvalidFrameSize(size))?;
        // The loader caps memory at u32::MAX bytes, so a pointer always fits.
        self.push((self.bp as u32).to_le_bytes())?;
        self.bp = self.sp;
        match self.sp.checked_sub(size) {
            Some(sp) if sp >= self.floor => {
                self.sp = sp;
                Ok(())
            }
            _ => Err(RuntimeError::StackOverflow {
                sp: self.sp,
                floor: self.floor,
            }),
        }
    }

    /// Discard the current frame and restore the caller's base pointer.
    pub fn pop_frame(&mut self) -> Result<(), RuntimeError> {
        self.sp = self.bp;
        let saved = u32::from_le_bytes(self.pop()?) as usize;
        if saved > self.memory.len() || saved < self.floor {
            return Err(RuntimeError::OutOfBounds {
                offset: 0,
                bp: saved,
            });
        }
        self.bp = saved;
        Ok(())
    }

    fn address(&self, offset: i32) -> Result<usize, RuntimeError> {
        let out_of_bounds = RuntimeError::OutOfBounds {
            offset,
            bp: self.bp,
        };
        let addr = (self.bp as i64) - i64::from(offset);
        if addr < self.floor as i64 || addr + WORD as i64 > self.memory.len() as i64 {
            return Err(out_of_bounds);
        }
        Ok(addr as usize)
    }

    pub fn read_offset(&self, offset: i32) -> Result<[u8; 4], RuntimeError> {
        let addr = self.address(offset)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(&self.memory[addr..addr + WORD]);
        Ok(word)
    }

    pub fn write_offset(&mut self, offset: i32, word: [u8; 4]) -> Result<(), RuntimeError> {
        let addr = self.address(offset)?;
        self.memory[addr..addr + WORD].copy_from_slice(&word);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(len: usize, floor: usize) -> Stack {
        Stack::new(vec![0u8; len].into_boxed_slice(), floor)
    }

    #[test]
    fn starts_empty_at_top() {
        let s = stack(64, 0);
        assert_eq!(s.sp(), 64);
        assert_eq!(s.bp(), 64);
    }

    #[test]
    fn push_pop_descending() {
        let mut s = stack(64, 0);
        s.push(7i32.to_le_bytes()).unwrap();
        s.push(9i32.to_le_bytes()).unwrap();
        assert_eq!(s.sp(), 56);
        assert_eq!(s.pop_i32().unwrap(), 9);
        assert_eq!(s.pop_i32().unwrap(), 7);
        assert_eq!(s.sp(), 64);
    }

    #[test]
    fn pop_empty_underflows() {
        let mut s = stack(16, 0);
        assert_eq!(s.pop(), Err(RuntimeError::StackUnderflow { sp: 16 }));
    }

    #[test]
    fn push_into_program_overflows() {
        let mut s = stack(16, 12);
        s.push([1; 4]).unwrap();
        assert!(matches!(
            s.push([2; 4]),
            Err(RuntimeError::StackOverflow { sp: 12, floor: 12 })
        ));
    }

    #[test]
    fn frame_setup_and_teardown() {
        let mut s = stack(64, 0);
        s.setup_frame(8).unwrap();
        assert_eq!(s.bp(), 60);
        assert_eq!(s.sp(), 52);

        s.write_offset(4, 42i32.to_le_bytes()).unwrap();
        s.write_offset(8, 43i32.to_le_bytes()).unwrap();
        assert_eq!(s.read_offset(4).unwrap(), 42i32.to_le_bytes());
        assert_eq!(s.memory()[56..60], 42i32.to_le_bytes());

        s.setup_frame(4).unwrap();
        assert_eq!(s.bp(), 48);
        s.write_offset(4, 1i32.to_le_bytes()).unwrap();

        s.pop_frame().unwrap();
        assert_eq!(s.bp(), 60);
        assert_eq!(s.sp(), 52);
        assert_eq!(s.read_offset(8).unwrap(), 43i32.to_le_bytes());

        s.pop_frame().unwrap();
        assert_eq!(s.bp(), 64);
        assert_eq!(s.sp(), 64);
    }

    #[test]
    fn oversized_frame_overflows() {
        let mut s = stack(32, 8);
        assert!(matches!(
            s.setup_frame(64),
            Err(RuntimeError::StackOverflow { .. })
        ));
    }

    #[test]
    fn negative_frame_rejected() {
        let mut s = stack(32, 0);
        assert_eq!(s.setup_frame(-4), Err(RuntimeError::InvalidFrameSize(-4)));
    }

    #[test]
    fn offsets_are_bounds_checked() {
        let mut s = stack(32, 8);
        s.setup_frame(4).unwrap();
        assert!(s.read_offset(4).is_ok());
        assert_eq!(
            s.read_offset(100),
            Err(RuntimeError::OutOfBounds { offset: 100, bp: 28 })
        );
        assert!(s.write_offset(-8, [0; 4]).is_err());
    }
}
