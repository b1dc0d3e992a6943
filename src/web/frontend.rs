//! Embedded HTML/CSS/JS frontend for the gaan web app.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.

/// The complete single-page app HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="bn">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>gaan — লিরিক্স ক্লিনার</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --radius: 8px;
  --font: 'Noto Sans Bengali', 'Hind Siliguri', -apple-system, 'Segoe UI', sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.6;
}

.app { max-width: 1200px; margin: 0 auto; padding: 24px; }

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 24px; font-weight: 600; }
header h1 .logo { color: var(--accent); font-weight: 700; }
header .subtitle { color: var(--text-muted); font-size: 13px; }

nav {
  display: flex;
  gap: 4px;
  margin-bottom: 24px;
  background: var(--surface);
  border-radius: var(--radius);
  padding: 4px;
  border: 1px solid var(--border);
}
nav button {
  flex: 1;
  padding: 8px 16px;
  border: none;
  border-radius: 6px;
  background: transparent;
  color: var(--text-muted);
  font: inherit;
  cursor: pointer;
}
nav button:hover { color: var(--text); }
nav button.active { background: var(--accent); color: #fff; }

.panel { display: none; }
.panel.active { display: block; }

.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 16px;
}
.card h2 { font-size: 16px; font-weight: 600; margin-bottom: 12px; }

.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
@media (max-width: 800px) { .columns { grid-template-columns: 1fr; } }

textarea, input, select {
  width: 100%;
  background: var(--bg);
  color: var(--text);
  border: 1px solid var(--border);
  border-radius: 6px;
  padding: 10px;
  font: inherit;
}
textarea { min-height: 320px; resize: vertical; }

.row { display: flex; gap: 8px; align-items: center; margin-top: 12px; }
.row > * { flex: 1; }

button.btn {
  padding: 8px 14px;
  border: 1px solid var(--border);
  border-radius: 6px;
  background: var(--surface);
  color: var(--text);
  font: inherit;
  cursor: pointer;
}
button.btn.primary { background: var(--accent); border-color: var(--accent); color: #fff; }
button.btn.danger { border-color: var(--red); color: var(--red); }
button.btn:disabled { opacity: 0.5; cursor: default; }

.stats-grid {
  display: grid;
  grid-template-columns: repeat(4, 1fr);
  gap: 16px;
  margin-top: 16px;
}
.stat-card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
  text-align: center;
}
.stat-card .value { font-size: 28px; font-weight: 700; color: var(--accent); }
.stat-card .label { font-size: 12px; color: var(--text-muted); }

table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid var(--border); }
th { color: var(--text-muted); font-weight: 500; }

.form-grid { display: grid; grid-template-columns: 1fr 1fr; gap: 8px; }
.form-grid .wide { grid-column: span 2; }
.muted { color: var(--text-muted); font-size: 12px; }

.toast {
  position: fixed;
  bottom: 24px;
  right: 24px;
  padding: 10px 16px;
  border-radius: 6px;
  background: var(--green);
  color: #fff;
  transform: translateY(100px);
  opacity: 0;
  transition: all 0.25s;
}
.toast.show { transform: translateY(0); opacity: 1; }
.toast.error { background: var(--red); }
</style>
</head>
<body>
<div class="app">
  <header>
    <div>
      <h1><span class="logo">gaan</span> বাংলা লিরিক্স ক্লিনার</h1>
      <div class="subtitle">অতিরিক্ত স্পেস, বিরামচিহ্ন আর ফাঁকা লাইন পরিষ্কার করুন</div>
    </div>
    <div class="muted" id="health"></div>
  </header>

  <nav>
    <button class="active" data-panel="cleaner" onclick="showPanel('cleaner')">লিরিক্স ক্লিনার</button>
    <button data-panel="artists" onclick="showPanel('artists')">শিল্পী</button>
    <button data-panel="history" onclick="showPanel('history')">ইতিহাস</button>
  </nav>

  <!-- Cleaner -->
  <section class="panel active" id="panel-cleaner">
    <div class="columns">
      <div class="card">
        <h2>ইনপুট লিরিক্স</h2>
        <textarea id="input" placeholder="আপনার লিরিক্স এখানে লিখুন..." oninput="onInput()"></textarea>
        <div class="row">
          <label><input type="checkbox" id="auto-clean" style="width:auto"> স্বয়ংক্রিয় পরিষ্কার</label>
          <select id="mode">
            <option value="single-blank">একটি ফাঁকা লাইন রাখুন</option>
            <option value="density-reduce">ঘনত্ব অনুযায়ী কমান</option>
            <option value="remove-all">সব ফাঁকা লাইন মুছুন</option>
          </select>
        </div>
        <div class="row">
          <button class="btn" onclick="loadSample()">নমুনা লোড করুন</button>
          <button class="btn" onclick="clearAll()">সব মুছুন</button>
        </div>
      </div>
      <div class="card">
        <h2>পরিষ্কার করা লিরিক্স</h2>
        <textarea id="output" readonly placeholder="পরিষ্কার করা লিরিক্স এখানে দেখানো হবে..."></textarea>
        <div class="row">
          <button class="btn primary" id="clean-btn" onclick="cleanLyrics()">লিরিক্স পরিষ্কার করুন</button>
          <button class="btn" onclick="copyOutput()">কপি</button>
        </div>
      </div>
    </div>
    <div class="stats-grid">
      <div class="stat-card"><div class="value" id="in-words">০</div><div class="label">মূল শব্দ</div></div>
      <div class="stat-card"><div class="value" id="in-lines">০</div><div class="label">মূল লাইন</div></div>
      <div class="stat-card"><div class="value" id="out-words">০</div><div class="label">পরিষ্কার শব্দ</div></div>
      <div class="stat-card"><div class="value" id="out-lines">০</div><div class="label">পরিষ্কার লাইন</div></div>
    </div>
  </section>

  <!-- Artists -->
  <section class="panel" id="panel-artists">
    <div class="columns">
      <div class="card">
        <h2>শিল্পী তালিকা</h2>
        <table>
          <thead><tr><th>নাম</th><th>ধরন</th><th>দেশ</th><th>গান</th><th></th></tr></thead>
          <tbody id="artist-rows"></tbody>
        </table>
      </div>
      <div class="card">
        <h2 id="artist-form-title">নতুন শিল্পী</h2>
        <div class="form-grid">
          <input id="a-name" class="wide" placeholder="নাম *">
          <select id="a-genre">
            <option value="">ধরন</option>
            <option>রবীন্দ্র সঙ্গীত</option><option>নজরুল গীতি</option><option>লোকসঙ্গীত</option>
            <option>আধুনিক গান</option><option>ব্যান্ড সঙ্গীত</option><option>ক্লাসিকাল</option>
            <option>ভাওয়াইয়া</option><option>ভাটিয়ালি</option><option>অন্যান্য</option>
          </select>
          <select id="a-country">
            <option value="">দেশ</option>
            <option>বাংলাদেশ</option><option>ভারত</option><option>পাকিস্তান</option>
            <option>যুক্তরাজ্য</option><option>যুক্তরাষ্ট্র</option><option>অন্যান্য</option>
          </select>
          <input id="a-birth" type="date">
          <input id="a-image" placeholder="ছবির URL">
          <textarea id="a-bio" class="wide" style="min-height:80px" placeholder="জীবনী"></textarea>
        </div>
        <div class="row">
          <button class="btn primary" onclick="saveArtist()">সংরক্ষণ করুন</button>
          <button class="btn" onclick="resetArtistForm()">বাতিল</button>
        </div>
        <div id="songs-box" style="display:none; margin-top:16px">
          <h2>গান</h2>
          <table><tbody id="song-rows"></tbody></table>
          <div class="form-grid" style="margin-top:8px">
            <input id="s-title" placeholder="শিরোনাম *">
            <input id="s-album" placeholder="অ্যালবাম">
            <input id="s-date" type="date">
            <button class="btn" onclick="addSong()">গান যোগ করুন</button>
          </div>
        </div>
      </div>
    </div>
  </section>

  <!-- History -->
  <section class="panel" id="panel-history">
    <div class="card">
      <h2>পরিষ্কারের ইতিহাস (৩০ দিন)</h2>
      <div class="stats-grid" id="history-stats"></div>
      <table style="margin-top:16px">
        <thead><tr><th>তারিখ</th><th>রান</th><th>ফাঁকা লাইন মুছেছে</th></tr></thead>
        <tbody id="history-rows"></tbody>
      </table>
    </div>
  </section>
</div>

<div class="toast" id="toast"></div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
let editingArtist = null;
let autoTimer = null;

const SAMPLE = `আজি   মেঘ কেটে গেছে সকালবেলায়,
     এসো এসো এসো   তোমার হাসিমুখে--
            এসো আমার অলস দিনের খেলায়॥
     স্বপ্নে যত জমেছিল আশা-নিরাশায়
     তরুণ প্রাণের বিফল ভালোবাসায়
দিব  অকূল-পানে ভাসায়ে ভাঁটার গাঙের ভেলায়।
     দুঃখসুখের বাঁধন তারি গ্রন্থি দিব খুলে,
     আজি ক্ষণেক-তরে মোরা রব আপন ভুলে।
যে গান হয় নি গাওয়া       যে দান হয় নি পাওয়া--
     আজি   পুরব-হাওয়ায় তারি পরিতাপ
             উড়াব অবহেলায়`;

// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  const data = await res.json();
  if (!res.ok) throw new Error(data.error || res.statusText);
  return data;
}

function toast(msg, isError) {
  const el = document.getElementById('toast');
  el.textContent = msg;
  el.className = 'toast show' + (isError ? ' error' : '');
  setTimeout(() => el.className = 'toast', 3000);
}

function esc(s) {
  return String(s ?? '').replace(/[&<>"']/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[c]));
}

function bn(n) {
  return String(n).replace(/[0-9]/g, d => '০১২৩৪৫৬৭৮৯'[d]);
}

function $(id) { return document.getElementById(id); }

function showPanel(name) {
  document.querySelectorAll('nav button').forEach(b => b.classList.toggle('active', b.dataset.panel === name));
  document.querySelectorAll('.panel').forEach(p => p.classList.toggle('active', p.id === 'panel-' + name));
  if (name === 'artists') loadArtists();
  if (name === 'history') loadHistory();
}

// ---------------------------------------------------------------------------
// Cleaner
// ---------------------------------------------------------------------------
function setStats(prefix, stats) {
  $(prefix + '-words').textContent = stats.words_display;
  $(prefix + '-lines').textContent = stats.lines_display;
}

async function cleanLyrics(quiet) {
  const text = $('input').value;
  if (!text.trim()) {
    if (!quiet) toast('অনুগ্রহ করে লিরিক্স লিখুন', true);
    return;
  }
  try {
    const data = await api('POST', '/api/clean', { text, mode: $('mode').value });
    $('output').value = data.cleaned;
    setStats('in', data.input);
    setStats('out', data.output);
    if (!quiet) toast('লিরিক্স সফলভাবে পরিষ্কার হয়েছে!');
  } catch (e) {
    toast(e.message, true);
  }
}

function onInput() {
  const auto = $('auto-clean').checked;
  $('clean-btn').disabled = auto;
  if (!auto) return;
  clearTimeout(autoTimer);
  autoTimer = setTimeout(() => cleanLyrics(true), 150);
}

function loadSample() {
  $('input').value = SAMPLE;
  onInput();
}

function clearAll() {
  $('input').value = '';
  $('output').value = '';
  ['in', 'out'].forEach(p => setStats(p, { words_display: '০', lines_display: '০' }));
}

async function copyOutput() {
  const text = $('output').value;
  if (!text) {
    toast('কপি করার জন্য কোনো লিরিক্স নেই', true);
    return;
  }
  try {
    await navigator.clipboard.writeText(text);
    toast('লিরিক্স কপি হয়েছে!');
  } catch (e) {
    toast('কপি করা যায়নি', true);
  }
}

$('auto-clean').addEventListener('change', onInput);
$('mode').addEventListener('change', () => { if ($('auto-clean').checked) cleanLyrics(true); });

// ---------------------------------------------------------------------------
// Artists
// ---------------------------------------------------------------------------
async function loadArtists() {
  try {
    const artists = await api('GET', '/api/artists');
    $('artist-rows').innerHTML = artists.map(a => `
      <tr>
        <td><a href="#" onclick="editArtist('${esc(a.id)}'); return false">${esc(a.name)}</a></td>
        <td>${esc(a.genre)}</td>
        <td>${esc(a.country)}</td>
        <td>${bn(a.songs.length)}</td>
        <td><button class="btn danger" onclick="deleteArtist('${esc(a.id)}')">মুছুন</button></td>
      </tr>`).join('') || '<tr><td colspan="5" class="muted">কোনো শিল্পী নেই</td></tr>';
  } catch (e) {
    toast(e.message, true);
  }
}

function artistPayload() {
  return {
    name: $('a-name').value,
    genre: $('a-genre').value,
    country: $('a-country').value,
    birthDate: $('a-birth').value,
    image: $('a-image').value,
    biography: $('a-bio').value,
  };
}

function resetArtistForm() {
  editingArtist = null;
  ['a-name', 'a-genre', 'a-country', 'a-birth', 'a-image', 'a-bio'].forEach(id => $(id).value = '');
  $('artist-form-title').textContent = 'নতুন শিল্পী';
  $('songs-box').style.display = 'none';
}

async function saveArtist() {
  try {
    if (editingArtist) {
      await api('PUT', '/api/artists/' + editingArtist, artistPayload());
      toast('শিল্পী আপডেট হয়েছে');
      await editArtist(editingArtist);
    } else {
      const artist = await api('POST', '/api/artists', artistPayload());
      toast('শিল্পী যোগ হয়েছে');
      await editArtist(artist.id);
    }
    loadArtists();
  } catch (e) {
    toast(e.message, true);
  }
}

async function editArtist(id) {
  try {
    const a = await api('GET', '/api/artists/' + id);
    editingArtist = a.id;
    $('a-name').value = a.name;
    $('a-genre').value = a.genre || '';
    $('a-country').value = a.country || '';
    $('a-birth').value = a.birthDate || '';
    $('a-image').value = a.image || '';
    $('a-bio').value = a.biography || '';
    $('artist-form-title').textContent = a.name;
    $('songs-box').style.display = 'block';
    $('song-rows').innerHTML = a.songs.map(s => `
      <tr>
        <td>${esc(s.title)}</td>
        <td>${esc(s.album)}</td>
        <td>${esc(s.releaseDate)}</td>
        <td><button class="btn danger" onclick="removeSong('${esc(s.id)}')">মুছুন</button></td>
      </tr>`).join('') || '<tr><td class="muted">কোনো গান নেই</td></tr>';
  } catch (e) {
    toast(e.message, true);
  }
}

async function deleteArtist(id) {
  if (!confirm('এই শিল্পীকে মুছে ফেলবেন?')) return;
  try {
    await api('DELETE', '/api/artists/' + id);
    if (editingArtist === id) resetArtistForm();
    toast('শিল্পী মুছে ফেলা হয়েছে');
    loadArtists();
  } catch (e) {
    toast(e.message, true);
  }
}

async function addSong() {
  try {
    await api('POST', `/api/artists/${editingArtist}/songs`, {
      title: $('s-title').value,
      album: $('s-album').value,
      releaseDate: $('s-date').value,
    });
    ['s-title', 's-album', 's-date'].forEach(id => $(id).value = '');
    await editArtist(editingArtist);
    loadArtists();
  } catch (e) {
    toast(e.message, true);
  }
}

async function removeSong(songId) {
  try {
    await api('DELETE', `/api/artists/${editingArtist}/songs/${songId}`);
    await editArtist(editingArtist);
    loadArtists();
  } catch (e) {
    toast(e.message, true);
  }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------
async function loadHistory() {
  try {
    const data = await api('GET', '/api/history?days=30');
    const s = data.summary;
    const card = (value, label) => `<div class="stat-card"><div class="value">${bn(value)}</div><div class="label">${label}</div></div>`;
    $('history-stats').innerHTML =
      card(s.runs, 'মোট রান') +
      card(s.input_words, 'ইনপুট শব্দ') +
      card(s.output_words, 'আউটপুট শব্দ') +
      card(s.blank_lines_removed, 'ফাঁকা লাইন মুছেছে');
    $('history-rows').innerHTML = data.daily.map(d => `
      <tr><td>${esc(d.date)}</td><td>${bn(d.runs)}</td><td>${bn(d.blank_lines_removed)}</td></tr>`).join('')
      || '<tr><td colspan="3" class="muted">কোনো ইতিহাস নেই</td></tr>';
  } catch (e) {
    toast(e.message, true);
  }
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------
api('GET', '/api/health')
  .then(h => { $('health').textContent = 'v' + h.version + ' · ' + bn(h.artists) + ' শিল্পী'; })
  .catch(() => {});
</script>
</body>
</html>
"##;
