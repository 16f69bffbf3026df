pub trait Set<Args> {
    type Error;
    fn set(&mut self, args: Args) -> Result<(), Self::Error>;
}

pub trait Query {
    type Output;
    type Error;
    fn query(&self) -> Result<Self::Output, Self::Error>;
}
