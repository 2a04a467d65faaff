pub mod binary;
pub mod data;

pub const TEST_DATA: [&[u8]; 10] = [
    "Frankly, my dear, I don't give a damn.".as_bytes(),
    "I'm going to make him an offer he can't refuse.".as_bytes(),
    "Toto, I've got a feeling we're not in Kansas anymore.".as_bytes(),
    "Here's looking at you, kid.".as_bytes(),
    "Go ahead, make my day.".as_bytes(),
    "May the Force be with you.".as_bytes(),
    "You talking to me?".as_bytes(),
    "What we've got here is failure to communicate.".as_bytes(),
    "I love the smell of napalm in the morning.".as_bytes(),
    "Love means never having to say you're sorry.".as_bytes(),
];
